//! Format layer creation macros

/// Builds a text layer (`pretty` or `compact`) writing to stderr.
macro_rules! create_fmt_layer {
    ($format:ident, $display:expr) => {{
        tracing_subscriber::fmt::layer()
            .$format()
            .with_writer(std::io::stderr)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_timer($crate::format::make_timer($display.time))
    }};
}

/// Builds a JSON layer writing to stderr.
macro_rules! create_json_layer {
    ($display:expr) => {{
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .flatten_event($display.flatten)
            .with_ansi(false)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_timer($crate::format::make_timer($display.time))
    }};
}
