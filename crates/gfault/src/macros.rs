/// Construct a full diagnostic `Fault` with location tracking.
///
/// # Forms
///
/// ```ignore
/// // Message only, unset codes:
/// fault!("config file missing")
///
/// // Domain, code, message:
/// fault!(DOMAIN_BILLING, CODE_DECLINED, "card declined")
///
/// // With source error:
/// fault!(DOMAIN_BILLING, CODE_DECLINED, "card declined", source = io_err)
/// ```
#[macro_export]
macro_rules! fault {
    ($msg:expr) => {
        $crate::fault!($crate::FaultCode::UNSET, $crate::FaultCode::UNSET, $msg)
    };

    ($domain:expr, $code:expr, $msg:expr) => {{
        let mut ctx = $crate::FaultContext::new($domain, $code)
            .with_message($msg)
            .with_location(file!(), line!());
        ctx.capture_backtrace();
        $crate::Fault::full(ctx)
    }};

    ($domain:expr, $code:expr, $msg:expr, source = $source:expr) => {{
        let mut ctx = $crate::FaultContext::new($domain, $code)
            .with_message($msg)
            .with_location(file!(), line!())
            .with_source($source);
        ctx.capture_backtrace();
        $crate::Fault::full(ctx)
    }};
}

/// Early-return `Err(fault!(..))` if a condition is false.
///
/// ```ignore
/// ensure!(!tag.is_empty(), DOMAIN_TAGS, CODE_EMPTY, "tag must not be empty");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $domain:expr, $code:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::fault!($domain, $code, $msg).into());
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Fault, FaultCode};
    use std::error::Error;

    const DOMAIN_BILLING: FaultCode = FaultCode::new("billing", 1000);
    const CODE_DECLINED: FaultCode = FaultCode::new("declined", 1001);
    const CODE_LIMIT: FaultCode = FaultCode::new("limit", 1002);

    #[test]
    fn fault_message_only() {
        let f = fault!("config file missing");
        assert!(f.domain().is_unset());
        assert!(!f.is_simple());
        #[cfg(not(feature = "production"))]
        {
            assert_eq!(f.message(), "config file missing");
            let (file, line) = f.context().and_then(|c| c.location()).unwrap();
            assert!(file.ends_with("macros.rs"));
            assert!(line > 0);
        }
    }

    #[test]
    fn fault_with_codes() {
        let f = fault!(DOMAIN_BILLING, CODE_DECLINED, "card declined");
        assert_eq!(f.domain(), &DOMAIN_BILLING);
        assert_eq!(f.code(), &CODE_DECLINED);
    }

    #[test]
    fn fault_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "gateway");
        let f = fault!(DOMAIN_BILLING, CODE_DECLINED, "card declined", source = io_err);
        assert!(f.source().is_some());
    }

    #[test]
    fn ensure_passes_and_fails() {
        fn charge(amount: u32) -> Result<u32, Fault> {
            ensure!(amount <= 500, DOMAIN_BILLING, CODE_LIMIT, "over limit");
            Ok(amount)
        }
        assert_eq!(charge(20).unwrap(), 20);
        let f = charge(900).unwrap_err();
        assert_eq!(f.code(), &CODE_LIMIT);
    }
}
