/// Reported once per produced simulation tick.
#[derive(Debug, Clone)]
pub struct SimProgressEvent {
    /// 1-based count of ticks produced so far.
    pub tick: usize,
    pub total: usize,
    pub alert_count: usize,
    pub elapsed_wall_s: f64,
}

impl SimProgressEvent {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.tick as f64 / self.total as f64
        }
    }
}
