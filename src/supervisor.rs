//! Background tasks joined before teardown

use std::fmt;
use std::io;
use std::mem;
use std::thread::{self, JoinHandle};

/// Runs tasks on background threads and waits for them to finish.
///
/// Tasks submitted with [`submit`] are tracked and joined by
/// [`await_all`], or when the `Supervisor` is dropped. Dropping a
/// supervisor therefore blocks until every tracked task has completed.
///
/// There is no cancellation; a tracked task that never returns will block
/// the supervisor indefinitely.
///
/// # Examples
///
/// ```
/// # use std::io;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use termplus::Supervisor;
///
/// # fn example() -> io::Result<()> {
/// let count = Arc::new(AtomicUsize::new(0));
/// let mut tasks = Supervisor::new();
///
/// for _ in 0..4 {
///     let count = count.clone();
///     tasks.submit(move || { count.fetch_add(1, Ordering::SeqCst); })?;
/// }
///
/// tasks.await_all();
/// assert_eq!(count.load(Ordering::SeqCst), 4);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
///
/// [`submit`]: #method.submit
/// [`await_all`]: #method.await_all
#[derive(Default)]
pub struct Supervisor {
    tasks: Vec<JoinHandle<()>>,
    spawned: usize,
}

impl Supervisor {
    /// Creates a supervisor with no tasks.
    pub fn new() -> Supervisor {
        Supervisor::default()
    }

    /// Runs `task` on a new thread and tracks it until it is joined.
    pub fn submit<F>(&mut self, task: F) -> io::Result<&mut Self>
            where F: FnOnce() + Send + 'static {
        let handle = self.spawn(task)?;
        self.tasks.push(handle);
        Ok(self)
    }

    /// Runs `task` on a new thread without tracking it.
    ///
    /// The task is never joined and may outlive the supervisor.
    pub fn submit_detached<F>(&mut self, task: F) -> io::Result<&mut Self>
            where F: FnOnce() + Send + 'static {
        self.spawn(task)?;
        Ok(self)
    }

    /// Blocks until every tracked task has finished.
    ///
    /// Afterwards, no tasks are tracked. A task that panicked is logged
    /// and otherwise ignored.
    pub fn await_all(&mut self) -> &mut Self {
        let tasks = mem::replace(&mut self.tasks, Vec::new());

        for handle in tasks {
            let name = handle.thread().name().map(str::to_owned);

            if handle.join().is_err() {
                tracing::warn!("task {} panicked",
                    name.as_ref().map_or("<unnamed>", |s| &s[..]));
            }
        }

        self
    }

    /// Returns the number of tracked tasks not yet joined.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    fn spawn<F>(&mut self, task: F) -> io::Result<JoinHandle<()>>
            where F: FnOnce() + Send + 'static {
        let name = format!("termplus-task-{}", self.spawned);
        self.spawned += 1;

        tracing::trace!("spawning {}", name);

        thread::Builder::new()
            .name(name)
            .spawn(task)
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.await_all();
    }
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("pending", &self.pending())
            .field("spawned", &self.spawned)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::Supervisor;

    #[test]
    fn test_await_all() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut sup = Supervisor::new();

        for _ in 0..3 {
            let count = count.clone();
            sup.submit(move || {
                thread::sleep(Duration::from_millis(20));
                count.fetch_add(1, Ordering::SeqCst);
            }).unwrap();
        }

        assert_eq!(sup.pending(), 3);

        sup.await_all();
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(sup.pending(), 0);

        // Nothing to join
        sup.await_all();
        assert_eq!(sup.pending(), 0);
    }

    #[test]
    fn test_drop_blocks() {
        let done = Arc::new(AtomicBool::new(false));

        {
            let mut sup = Supervisor::new();
            let done = done.clone();

            sup.submit(move || {
                thread::sleep(Duration::from_millis(50));
                done.store(true, Ordering::SeqCst);
            }).unwrap();
        }

        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn test_detached_not_tracked() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut sup = Supervisor::new();

        sup.submit_detached(move || { tx.send(()).unwrap(); }).unwrap();
        assert_eq!(sup.pending(), 0);

        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn test_panicked_task() {
        let mut sup = Supervisor::new();

        sup.submit(|| panic!("task failed")).unwrap()
            .submit(|| ()).unwrap();

        sup.await_all();
        assert_eq!(sup.pending(), 0);
    }

    #[test]
    fn test_thread_names() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut sup = Supervisor::new();

        for _ in 0..2 {
            let tx = tx.clone();
            sup.submit(move || {
                tx.send(thread::current().name().map(str::to_owned)).unwrap();
            }).unwrap();
        }

        sup.await_all();

        let mut names: Vec<_> = rx.try_iter().collect();
        names.sort();

        assert_eq!(names, [
            Some("termplus-task-0".to_owned()),
            Some("termplus-task-1".to_owned()),
        ]);
    }
}
