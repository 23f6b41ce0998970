use std::io;

use crate::code::DOMAIN_IO;
use crate::context::FaultContext;
use crate::{Fault, FaultCode};

/// Maps `io::ErrorKind` to a `FaultCode`.
fn io_fault_code(kind: io::ErrorKind) -> FaultCode {
    match kind {
        io::ErrorKind::NotFound          => FaultCode::new("not_found", 101),
        io::ErrorKind::PermissionDenied  => FaultCode::new("permission_denied", 102),
        io::ErrorKind::ConnectionRefused => FaultCode::new("conn_refused", 103),
        io::ErrorKind::ConnectionReset   => FaultCode::new("conn_reset", 104),
        io::ErrorKind::BrokenPipe        => FaultCode::new("broken_pipe", 109),
        io::ErrorKind::AlreadyExists     => FaultCode::new("already_exists", 110),
        io::ErrorKind::WouldBlock        => FaultCode::new("would_block", 111),
        io::ErrorKind::InvalidInput      => FaultCode::new("invalid_input", 112),
        io::ErrorKind::InvalidData       => FaultCode::new("invalid_data", 113),
        io::ErrorKind::TimedOut          => FaultCode::new("timed_out", 114),
        io::ErrorKind::Interrupted       => FaultCode::new("interrupted", 115),
        io::ErrorKind::UnexpectedEof     => FaultCode::new("unexpected_eof", 116),
        _                                => FaultCode::new("other", 199),
    }
}

impl From<io::Error> for Fault {
    /// Raw OS errors take the Simple path, custom ones keep their source.
    fn from(err: io::Error) -> Self {
        let code = io_fault_code(err.kind());
        if err.raw_os_error().is_some() {
            return Fault::simple(DOMAIN_IO, code);
        }
        let ctx = FaultContext::new(DOMAIN_IO, code)
            .with_message(err.to_string())
            .with_source(err);
        Fault::full(ctx)
    }
}

impl From<Fault> for io::Error {
    fn from(fault: Fault) -> Self {
        io::Error::new(io::ErrorKind::Other, fault)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::msg(message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::msg(message)
    }
}

/// Extension trait for annotating foreign `Result`s with a `Fault`.
///
/// ```ignore
/// use gfault::ResultExt;
///
/// std::fs::read("tags.toml").fault_context("reading tag table")?;
/// socket.connect(addr).fault_ctx(DOMAIN_NET, CODE_CONNECT, "dialing upstream")?;
/// ```
pub trait ResultExt<T> {
    fn fault_context(self, msg: &str) -> Result<T, Fault>;

    fn fault_ctx(self, domain: FaultCode, code: FaultCode, msg: &str) -> Result<T, Fault>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn fault_context(self, msg: &str) -> Result<T, Fault> {
        self.map_err(|e| {
            Fault::full(
                FaultContext::new(crate::code::DOMAIN_STD, FaultCode::UNSET)
                    .with_message(msg)
                    .with_source(e),
            )
        })
    }

    fn fault_ctx(self, domain: FaultCode, code: FaultCode, msg: &str) -> Result<T, Fault> {
        self.map_err(|e| Fault::full(FaultContext::new(domain, code).with_message(msg).with_source(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn from_io_error_os() {
        let fault = Fault::from(io::Error::from_raw_os_error(104));
        assert!(fault.is_simple());
        assert_eq!(fault.domain(), &DOMAIN_IO);
    }

    #[test]
    fn from_io_error_custom() {
        let fault = Fault::from(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(!fault.is_simple());
        assert_eq!(fault.code().code, 114);
        assert!(fault.source().is_some());
    }

    #[test]
    fn into_io_error() {
        let io_err: io::Error = Fault::msg("nope").into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn question_mark_conversion() {
        fn inner() -> Result<(), io::Error> {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        }
        fn outer() -> Result<(), Fault> {
            inner()?;
            Ok(())
        }
        assert_eq!(outer().unwrap_err().code().code, 101);
    }

    #[test]
    #[cfg(not(feature = "production"))]
    fn from_strings() {
        assert_eq!(Fault::from("a").message(), "a");
        assert_eq!(Fault::from(String::from("b")).message(), "b");
    }

    #[test]
    fn result_ext_structured() {
        const DOMAIN_APP: FaultCode = FaultCode::new("app", 1000);
        const CODE_LOAD: FaultCode = FaultCode::new("load", 1001);

        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let fault = res.fault_ctx(DOMAIN_APP, CODE_LOAD, "loading tags").unwrap_err();
        assert_eq!(fault.domain(), &DOMAIN_APP);
        assert_eq!(fault.code(), &CODE_LOAD);
        assert!(fault.source().is_some());

        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let fault = res.fault_context("loading tags").unwrap_err();
        assert!(fault.downcast_ref::<io::Error>().is_some());
    }
}
