macro_rules! truncated {
    ($s:expr) => {
        $crate::types::Error::TruncatedHeader($s.into())
    };
    ($fmt:expr, $($args:tt)*) => {
        $crate::types::Error::TruncatedHeader(format!($fmt, $($args)*).into())
    }
}

macro_rules! marker_not_found {
    ($s:expr) => {
        $crate::types::Error::MarkerNotFound($s.into())
    };
    ($fmt:expr, $($args:tt)*) => {
        $crate::types::Error::MarkerNotFound(format!($fmt, $($args)*).into())
    }
}

macro_rules! if_eof {
    ($s:expr) => {
        |e: ::std::io::Error| match e.kind() {
            ::std::io::ErrorKind::UnexpectedEof => truncated!($s),
            _ => $crate::types::Error::from(e)
        }
    };
    ($fmt:expr, $($args:tt)*) => {
        |e: ::std::io::Error| match e.kind() {
            ::std::io::ErrorKind::UnexpectedEof => truncated!($fmt, $($args)*),
            _ => $crate::types::Error::from(e)
        }
    }
}
