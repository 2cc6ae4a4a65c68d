/// Events emitted by the workflows while they run.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskAdvance { steps: u64 },
    TaskFinish,

    /// A named tally produced by a phase, e.g. accepted or rejected variants.
    Tally { label: &'static str, count: usize },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Brackets `work` with `PhaseStart`/`PhaseFinish`. The finish event is sent
    /// even when `work` returns an error so front ends can tear down cleanly.
    pub fn phase<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let out = work();
        self.report(Progress::PhaseFinish);
        out
    }

    pub fn tally(&self, label: &'static str, count: usize) {
        self.report(Progress::Tally { label, count });
    }
}
