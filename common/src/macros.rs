/// Logs a message on the dedicated success target.
///
/// The CLI formatter renders this target with the `[+]` marker regardless
/// of the configured filter level.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: "barrage::success", $($arg)*)
    };
}
