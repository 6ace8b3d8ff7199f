//! Canonical logging macros
//!
//! Every macro takes the [`RunContext`](stepwise_core_types::RunContext) as
//! its first argument and stamps `run_id` on the event.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use stepwise_core::log_op_start;
/// # use stepwise_core::types::RunContext;
/// let ctx = RunContext::new();
/// log_op_start!(&ctx, "migrate");
/// log_op_start!(&ctx, "apply_unit", version = "000001");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($ctx:expr, $op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            run_id = $ctx.run_id.as_str(),
        );
    };
    ($ctx:expr, $op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            run_id = $ctx.run_id.as_str(),
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use stepwise_core::log_op_end;
/// # use stepwise_core::types::RunContext;
/// let ctx = RunContext::new();
/// log_op_end!(&ctx, "migrate", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($ctx:expr, $op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            run_id = $ctx.run_id.as_str(),
            duration_ms = $duration,
        );
    };
    ($ctx:expr, $op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            run_id = $ctx.run_id.as_str(),
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use stepwise_core::log_op_error;
/// # use stepwise_core::errors::MigrateError;
/// # use stepwise_core::types::RunContext;
/// let ctx = RunContext::new();
/// let err = MigrateError::InvalidAction { action: "sideways".to_string() };
/// log_op_error!(&ctx, "migrate", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($ctx:expr, $op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            run_id = $ctx.run_id.as_str(),
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
        );
    }};
    ($ctx:expr, $op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            run_id = $ctx.run_id.as_str(),
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            $($field)*
        );
    }};
}
