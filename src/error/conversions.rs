//! Type Conversions for RelayError

use super::types::RelayError;

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Stream(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<tokio_util::codec::LinesCodecError> for RelayError {
    fn from(err: tokio_util::codec::LinesCodecError) -> Self {
        use tokio_util::codec::LinesCodecError;
        match err {
            // body read failures surface as io errors wrapping the reqwest error
            LinesCodecError::Io(io) => match io
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            {
                Some(transport) => Self::Transport(transport.to_string()),
                None => Self::Stream(io.to_string()),
            },
            other => Self::Stream(other.to_string()),
        }
    }
}
