use ort::execution_providers::ExecutionProviderDispatch;

/// Execution providers registered on the detector session, in priority order.
///
/// ONNX Runtime falls back to its CPU provider when none of these can be
/// registered, so an empty list means "CPU only".
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        log::debug!("Requesting CoreML execution provider");
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        log::debug!("Requesting DirectML execution provider");
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        log::debug!("Using CPU execution provider");
        Vec::new()
    }
}
