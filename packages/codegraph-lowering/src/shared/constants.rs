//! Centralized constants
//!
//! Synthesized names the lowering emits, plus thread pool defaults.

/// Thread pool configuration
pub mod thread_pool {
    /// Percentage of available CPU cores to use for a local Rayon pool
    pub const CPU_UTILIZATION_PERCENT: f64 = 0.75;

    /// Minimum number of threads (always use at least 1)
    pub const MIN_THREADS: usize = 1;
}

/// Names synthesized during lowering
pub mod synthesized {
    /// Prefix for hoisted anonymous functions (`$Lambda0`, `$Lambda1`, ...)
    pub const LAMBDA_PREFIX: &str = "$Lambda";

    /// Prefix for destructured parameters (`$Param0`, ...)
    pub const PARAM_PREFIX: &str = "$Param";

    /// Function name every class constructor is lowered to
    pub const CONSTRUCTOR_NAME: &str = "Constructor";

    /// Member name for `new X(..)` and construct signatures
    pub const CONSTRUCTOR_FIELD: &str = "CONSTRUCTOR";

    /// Member name for element access and index signatures
    pub const ACCESS_FIELD: &str = "access";

    /// Member name for call signatures
    pub const CALL_FIELD: &str = "call";

    /// Prefix for postfix unary operators (`POST_++`)
    pub const POSTFIX_PREFIX: &str = "POST_";
}

/// Placeholder constants carried by `Expr::Const`
pub mod placeholders {
    pub const NUMBER: &str = "0";
    pub const STRING: &str = "\"\"";
    pub const REGEX: &str = "/regex/";
    pub const BOOL: &str = "true";
    pub const NULL: &str = "null";
    pub const ARRAY: &str = "[]";

    pub const NUMBER_TYPE: &str = "number";
    pub const STRING_TYPE: &str = "string";
    pub const REGEX_TYPE: &str = "RegExpr";
    pub const BOOL_TYPE: &str = "bool";
    pub const ARRAY_TYPE: &str = "array";
}
