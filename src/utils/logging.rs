#[cfg(feature = "logging")]
pub fn init_logger(
    min_level: log::LevelFilter, debug_file_name: &std::ffi::OsStr,
) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            // Note we aren't using local time since it only works on single-threaded processes.
            let offset = time::OffsetDateTime::now_utc();
            let timestamp = offset
                .format(&time::macros::format_description!(
                    // The weird "[[[" is because we need to escape a bracket ("[[") to show one "[".
                    // See https://time-rs.github.io/book/api/format-description.html
                    "[[[year]-[month]-[day]][[[hour]:[minute]:[second][subsecond digits:9]]"
                ))
                .unwrap_or_default();

            out.finish(format_args!(
                "{}[{}][{}] {}",
                timestamp,
                record.target(),
                record.level(),
                message
            ))
        })
        .level(min_level)
        .chain(fern::log_file(debug_file_name)?)
        .apply()?;

    Ok(())
}

/// Logs at the error level. Does nothing unless the `logging` feature is on.
#[macro_export]
macro_rules! error {
    ($($x:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::error!($($x)*)
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($x)*);
        }
    };
}

/// Logs at the warn level. Does nothing unless the `logging` feature is on.
#[macro_export]
macro_rules! warn {
    ($($x:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::warn!($($x)*)
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($x)*);
        }
    };
}

/// Logs at the info level. Does nothing unless the `logging` feature is on.
#[macro_export]
macro_rules! info {
    ($($x:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::info!($($x)*)
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($x)*);
        }
    };
}

/// Logs at the debug level. Does nothing unless the `logging` feature is on.
#[macro_export]
macro_rules! debug {
    ($($x:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::debug!($($x)*)
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($x)*);
        }
    };
}
