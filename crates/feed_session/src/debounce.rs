//! Trailing-edge debounce for search input.

use std::ops::Add;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Clock-agnostic debounce state. Each input replaces the pending value and
/// restarts the quiet period; `poll` hands the value out once the period
/// has elapsed with no further input.
#[derive(Debug, Clone)]
pub struct Debounce<T, I = Instant> {
    quiet: Duration,
    pending: Option<(T, I)>,
}

impl<T, I> Debounce<T, I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn input(&mut self, value: T, at: I) {
        self.pending = Some((value, at + self.quiet));
    }

    /// When the pending value commits, if there is one.
    pub fn deadline(&self) -> Option<I> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: I) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

}

/// Debounce running as a tokio task: raw values go in through [`push`],
/// committed values come out of [`next_commit`]. Dropping the debouncer,
/// or closing its input, discards whatever is still pending.
///
/// [`push`]: Debouncer::push
/// [`next_commit`]: Debouncer::next_commit
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    commits: mpsc::UnboundedReceiver<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(quiet: Duration) -> Self {
        let (input, mut raw) = mpsc::unbounded_channel::<T>();
        let (out, commits) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            let mut state: Debounce<T> = Debounce::new(quiet);
            loop {
                match state.deadline() {
                    None => match raw.recv().await {
                        Some(value) => state.input(value, Instant::now()),
                        None => break,
                    },
                    Some(deadline) => {
                        tokio::select! {
                            next = raw.recv() => match next {
                                Some(value) => state.input(value, Instant::now()),
                                None => break,
                            },
                            _ = tokio::time::sleep_until(deadline) => {
                                if let Some(value) = state.poll(Instant::now()) {
                                    if out.send(value).is_err() {
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        Self {
            input,
            commits,
            task,
        }
    }

    /// Feeds one raw value. False once the debounce task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }

    pub async fn next_commit(&mut self) -> Option<T> {
        self.commits.recv().await
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn replay(inputs: &[(u64, &'static str)]) -> Vec<(&'static str, u64)> {
        let mut debounce: Debounce<&str, Duration> = Debounce::new(SEARCH_DEBOUNCE);
        let mut commits = Vec::new();
        for t in 0..=2000 {
            for &(at, value) in inputs {
                if at == t {
                    debounce.input(value, ms(at));
                }
            }
            if let Some(value) = debounce.poll(ms(t)) {
                commits.push((value, t));
            }
        }
        commits
    }

    #[test]
    fn test_close_inputs_coalesce() {
        let commits = replay(&[(0, "m"), (100, "ma"), (250, "mat"), (400, "matr")]);
        assert_eq!(commits, vec![("matr", 700)]);
    }

    #[test]
    fn test_gap_longer_than_quiet_period_commits_early_value() {
        // "ma" sits untouched for 350ms, longer than the quiet period
        let commits = replay(&[(0, "m"), (100, "ma"), (450, "mat")]);
        assert_eq!(commits, vec![("ma", 400), ("mat", 750)]);
    }

    #[test]
    fn test_separate_bursts_commit_separately() {
        let mut debounce: Debounce<&str, Duration> = Debounce::new(SEARCH_DEBOUNCE);
        debounce.input("a", ms(0));
        assert_eq!(debounce.poll(ms(299)), None);
        assert_eq!(debounce.poll(ms(300)), Some("a"));
        assert_eq!(debounce.poll(ms(301)), None);
        debounce.input("ab", ms(1000));
        assert_eq!(debounce.deadline(), Some(ms(1300)));
        assert_eq!(debounce.poll(ms(1300)), Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_task_commits_after_each_quiet_period() {
        let mut debouncer = Debouncer::spawn(SEARCH_DEBOUNCE);
        let start = Instant::now();

        assert!(debouncer.push("m".to_string()));
        tokio::time::sleep(ms(100)).await;
        debouncer.push("ma".to_string());
        tokio::time::sleep(ms(350)).await;
        debouncer.push("mat".to_string());

        let first = debouncer.next_commit().await;
        assert_eq!(first.as_deref(), Some("ma"));

        let second = debouncer.next_commit().await;
        assert_eq!(second.as_deref(), Some("mat"));
        assert_eq!(start.elapsed(), ms(750));

        let nothing_else = tokio::time::timeout(ms(5000), debouncer.next_commit()).await;
        assert!(nothing_else.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_task_coalesces_a_fast_burst() {
        let mut debouncer = Debouncer::spawn(SEARCH_DEBOUNCE);
        let start = Instant::now();

        for value in ["g", "ge", "gem"] {
            debouncer.push(value.to_string());
            tokio::time::sleep(ms(100)).await;
        }

        let committed = debouncer.next_commit().await;
        assert_eq!(committed.as_deref(), Some("gem"));
        assert_eq!(start.elapsed(), ms(500));

        let nothing_else = tokio::time::timeout(ms(5000), debouncer.next_commit()).await;
        assert!(nothing_else.is_err());
    }
}
