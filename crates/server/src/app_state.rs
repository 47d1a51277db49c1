use engine::EngineOptions;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) options: EngineOptions,
    pub(crate) max_input_bytes: usize,
    pub(crate) max_body_bytes: usize,
}
