//! Building httperf command lines

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ratesweep_config::{Credentials, SweepConfig};
use std::fmt;
use std::path::{Path, PathBuf};

/// One httperf command line: a single URI at a single rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    uri: String,
    rate: u32,
}

impl Invocation {
    pub fn build(config: &SweepConfig, program: &Path, uri: &str, rate: u32) -> Self {
        let mut args = vec![
            "--client=0/1".to_string(),
            format!("--server={}", config.server),
            format!("--port={}", config.port),
            format!("--uri={}", uri),
            format!("--rate={}", rate),
            format!("--send-buffer={}", config.send_buffer),
            format!("--recv-buffer={}", config.recv_buffer),
            format!(
                "--add-header={}",
                header_block(&config.host, config.credentials())
            ),
            format!("--num-conns={}", config.connections),
            format!("--num-call={}", config.num_call),
        ];

        if config.hog {
            args.push("--hog".to_string());
        }

        Self {
            program: program.to_path_buf(),
            args,
            uri: uri.to_string(),
            rate,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }
}

/// Renders as a copy-pasteable shell command
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Extra request headers passed through `--add-header`.
///
/// Each header ends in a literal `\n` escape, which httperf expands itself.
pub fn header_block(host: &str, credentials: Option<Credentials<'_>>) -> String {
    let mut block = format!("Host:{}\\n", host);
    if let Some(credentials) = credentials {
        block.push_str(&basic_auth_header(credentials));
        block.push_str("\\n");
    }
    block
}

pub fn basic_auth_header(credentials: Credentials<'_>) -> String {
    let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
    format!("Authorization: Basic {}", token)
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./:,@%+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> PathBuf {
        PathBuf::from("/usr/bin/httperf")
    }

    #[test]
    fn test_default_invocation_args() {
        let config = SweepConfig::default();
        let invocation = Invocation::build(&config, &program(), "/", 50);

        assert_eq!(
            invocation.args(),
            &[
                "--client=0/1",
                "--server=localhost",
                "--port=80",
                "--uri=/",
                "--rate=50",
                "--send-buffer=4096",
                "--recv-buffer=16384",
                r"--add-header=Host:localhost\n",
                "--num-conns=200",
                "--num-call=10",
                "--hog",
            ]
        );
        assert_eq!(invocation.uri(), "/");
        assert_eq!(invocation.rate(), 50);
    }

    #[test]
    fn test_hog_flag_omitted_when_disabled() {
        let config = SweepConfig {
            hog: false,
            ..Default::default()
        };
        let invocation = Invocation::build(&config, &program(), "/", 50);
        assert!(!invocation.args().iter().any(|a| a == "--hog"));
    }

    #[test]
    fn test_header_block_with_basic_auth() {
        let config = SweepConfig {
            host: "www.example.com".to_string(),
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            ..Default::default()
        };

        let block = header_block(&config.host, config.credentials());
        assert_eq!(
            block,
            r"Host:www.example.com\nAuthorization: Basic dXNlcjpwYXNz\n"
        );
    }

    #[test]
    fn test_header_block_without_password() {
        let config = SweepConfig {
            username: Some("user".to_string()),
            ..Default::default()
        };
        let block = header_block(&config.host, config.credentials());
        assert!(!block.contains("Authorization"));
    }

    #[test]
    fn test_display_quotes_header_argument() {
        let config = SweepConfig {
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            hog: false,
            ..Default::default()
        };
        let invocation = Invocation::build(&config, &program(), "/index.html", 10);
        let rendered = invocation.to_string();

        assert!(rendered.starts_with("/usr/bin/httperf --client=0/1 --server=localhost"));
        assert!(rendered
            .contains(r"'--add-header=Host:localhost\nAuthorization: Basic dXNlcjpwYXNz\n'"));
        assert!(rendered.ends_with("--num-conns=200 --num-call=10"));
    }

    #[test]
    fn test_shell_quote_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
