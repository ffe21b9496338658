use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    SingleShot,
    Watching(Duration),
}

impl RefreshMode {
    /// A zero or absent interval means run once.
    pub fn from_interval(interval: Option<Duration>) -> Self {
        match interval {
            Some(every) if !every.is_zero() => RefreshMode::Watching(every),
            _ => RefreshMode::SingleShot,
        }
    }
}

/// Run `cycle` once, or forever with `interval` pauses in watch mode.
/// The cycle returns `Break` to end the loop early; otherwise only a
/// process interrupt stops a watch.
pub fn run<F>(mode: RefreshMode, mut cycle: F)
where
    F: FnMut(usize) -> ControlFlow<()>,
{
    match mode {
        RefreshMode::SingleShot => {
            let _ = cycle(1);
        }
        RefreshMode::Watching(interval) => {
            let mut n = 1;
            while cycle(n).is_continue() {
                debug!(cycle = n, ?interval, "sleeping until next refresh");
                thread::sleep(interval);
                n += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_single_shot() {
        assert_eq!(RefreshMode::from_interval(None), RefreshMode::SingleShot);
        assert_eq!(
            RefreshMode::from_interval(Some(Duration::ZERO)),
            RefreshMode::SingleShot
        );
        assert_eq!(
            RefreshMode::from_interval(Some(Duration::from_secs(300))),
            RefreshMode::Watching(Duration::from_secs(300))
        );
    }

    #[test]
    fn single_shot_runs_exactly_once() {
        let mut calls = 0;
        run(RefreshMode::SingleShot, |_| {
            calls += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn watching_repeats_until_stopped() {
        let mut seen = Vec::new();
        run(RefreshMode::Watching(Duration::from_millis(1)), |n| {
            seen.push(n);
            if n == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, [1, 2, 3, 4]);
    }
}
