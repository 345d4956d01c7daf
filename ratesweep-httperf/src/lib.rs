//! Driving httperf: locating the binary, building command lines, running
//! them and turning the textual report into [`RunResult`]s.

pub mod error;
pub mod invocation;
pub mod parser;
pub mod resolver;
pub mod result;
pub mod runner;

pub use error::{HttperfError, HttperfResult};
pub use invocation::{basic_auth_header, header_block, Invocation};
pub use parser::{parse_line, parse_output};
pub use resolver::resolve_binary;
pub use result::{HttperfMetrics, RunResult};
pub use runner::{HttperfRunner, LoadGenerator, RunOutput};
