use core::fmt;

use crate::hal::Rejected;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Host refused a call synchronously
    Rejected { line: u32, call: &'static str, status: Rejected },
    /// Host reported a failure of an earlier call
    Exception { code: u32, call: Option<&'static str>, index: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rejected { line, call, status } => {
                write!(f, "The call '{}' failed at line {} ({})", call, line, status)
            }
            Self::Exception { code, call: Some(call), index } => {
                write!(f, "Exception {} from {} at parameter {}", code, call, index)
            }
            Self::Exception { code, call: None, index } => {
                write!(f, "Exception {} from unknown call at parameter {}", code, index)
            }
        }
    }
}

mod test {
    #[test]
    fn test_display() {
        use std::string::ToString;

        use crate::hal::Rejected;

        use super::Error;

        let error = Error::Rejected { line: 42, call: "host.transmit(event)", status: Rejected(1) };
        assert_eq!(
            error.to_string(),
            "The call 'host.transmit(event)' failed at line 42 (host status 0x00000001)"
        );
        let error = Error::Exception { code: 3, call: None, index: 1 };
        assert_eq!(error.to_string(), "Exception 3 from unknown call at parameter 1");
    }
}
