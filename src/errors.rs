use thiserror::Error;

pub type Result<T, E = GdalError> = std::result::Result<T, E>;

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum GdalError {
    #[error("FfiNulError")]
    FfiNulError(#[from] std::ffi::NulError),
    #[error("GDAL method '{method_name}' returned a NULL pointer. Error msg: '{msg}'")]
    NullPointer {
        method_name: &'static str,
        msg: String,
    },
    #[error("Bad argument: {0}")]
    BadArgument(String),
    #[error("GDAL method '{method_name}' signaled a usage error")]
    UsageError { method_name: &'static str },
}
