// Macros to instrument (non-future) spans.

macro_rules! __idl_span_internal {
    ($level:ident; $($element:tt)*) => {
        #[cfg(feature = "tracing")]
        let _enter = ::tracing::span!(::tracing::Level::$level, $($element)*).entered();
    };
}

macro_rules! __idl_span_debug {
    ($($element:tt)*) => {
        __idl_span_internal!(DEBUG; $($element)*);
    };
}

macro_rules! __idl_span_trace {
    ($($element:tt)*) => {
        __idl_span_internal!(TRACE; $($element)*);
    };
}

// Macros to instrument events.

macro_rules! __idl_trace_internal {
    ($level:ident; $($element:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($element)*);
        }
    }};
}

macro_rules! __idl_trace {
    ($($element:tt)*) => {{
        __idl_trace_internal!(trace; $($element)*)
    }};
}

macro_rules! __idl_trace_debug {
    ($($element:tt)*) => {{
        __idl_trace_internal!(debug; $($element)*)
    }};
}

macro_rules! __idl_trace_warn {
    ($($element:tt)*) => {{
        __idl_trace_internal!(warn; $($element)*)
    }};
}
