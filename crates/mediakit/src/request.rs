/// One page render for the host to execute.
///
/// Small and copyable so it can be handed to the PDF library callback and
/// compared in tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    /// 1-indexed page number.
    pub page: u32,
    pub scale: f64,
}
