/// A task handle that aborts its task when the last clone of the owning
/// handle drops, so background listen loops never outlive their client.
pub(crate) struct AbortOnDropHandle(tokio::task::AbortHandle);

impl AbortOnDropHandle {
    pub(crate) fn new<T>(handle: &tokio::task::JoinHandle<T>) -> Self {
        Self(handle.abort_handle())
    }
}

impl Drop for AbortOnDropHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}
