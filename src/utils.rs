use std::{error::Error, fmt};

/// Writes `error` followed by each of its causes, one per line.
/// Used by the `Debug` impls of the crate's error enums so that logs show
/// the whole chain instead of the outermost message only.
pub fn fmt_error_chain(f: &mut fmt::Formatter<'_>, error: &dyn Error) -> fmt::Result{
    write!(f, "{}", error)?;

    let mut cause = error.source();
    while let Some(inner) = cause {
        write!(f, "\n\tCaused by: {}", inner)?;
        cause = inner.source();
    }

    Ok(())
}
