pub mod implementations;

/// Span factory for the trace stage; probe traffic gets no span.
#[derive(Clone, Copy, Debug, Default)]
pub struct CustomMakeSpan;
