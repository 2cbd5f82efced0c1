pub mod diagnostic;
pub mod sink;
pub mod terminal;
pub mod pipeline;
pub mod render_loop;

pub use diagnostic::DiagnosticLine;
pub use sink::{
    ChannelPixelSink, ConsoleDiagnostics, DiagnosticSink, LogDiagnostics, NullSink, PixelSink,
    SinkPair,
};
pub use terminal::TerminalStrip;
pub use pipeline::{GlowPipeline, RenderedFrame};
pub use render_loop::RenderLoop;
