use model::live::MarkerUpdate;
use tokio::sync::mpsc;

/// The map marker a tracker drives.
pub trait MarkerSink: Send + 'static {
    /// Moves the marker. Returns `false` once the marker is gone, which stops
    /// the current playback.
    fn update_marker(&mut self, update: MarkerUpdate) -> bool;
}

impl MarkerSink for mpsc::UnboundedSender<MarkerUpdate> {
    fn update_marker(&mut self, update: MarkerUpdate) -> bool {
        self.send(update).is_ok()
    }
}

impl MarkerSink for Vec<MarkerUpdate> {
    fn update_marker(&mut self, update: MarkerUpdate) -> bool {
        self.push(update);
        true
    }
}
