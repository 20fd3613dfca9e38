use once_cell::sync::OnceCell;
use rayon::ThreadPoolBuilder;
use std::sync::Arc;

static THREAD_POOL: OnceCell<Arc<rayon::ThreadPool>> = OnceCell::new();

/// Build a pool with `num_threads` workers.
fn build_pool(num_threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    Ok(ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("pagediff-worker-{i}"))
        .build()?)
}

/// Initialize the global thread pool with the specified number of threads
///
/// # Errors
///
/// Returns an error if the pool cannot be built or was already initialized
pub fn init_thread_pool(num_threads: usize) -> anyhow::Result<()> {
    let pool = build_pool(num_threads)?;

    THREAD_POOL
        .set(Arc::new(pool))
        .map_err(|_| anyhow::anyhow!("Thread pool already initialized"))?;

    Ok(())
}

/// Get the global thread pool, initializing with default settings if needed
///
/// Falls back to rayon's global pool if a dedicated pool cannot be built.
pub fn get_thread_pool() -> Option<Arc<rayon::ThreadPool>> {
    THREAD_POOL
        .get_or_try_init(|| build_pool(num_cpus::get().min(8)).map(Arc::new))
        .ok()
        .cloned()
}

/// Run a function in the configured thread pool
pub fn run_in_pool<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(f),
        None => f(),
    }
}

/// Configure the thread pool from `performance.parallel_threads`
///
/// # Errors
///
/// Returns an error if the thread pool has already been initialized
pub fn configure_from_config(config: &crate::config::Config) -> anyhow::Result<()> {
    if config.performance.parallel_threads > 0 {
        init_thread_pool(config.performance.parallel_threads)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_run_in_pool() {
        let sum: u64 = run_in_pool(|| (1..=100u64).into_par_iter().sum());
        assert_eq!(sum, 5050);
    }

    #[test]
    fn test_pool_available() {
        assert!(get_thread_pool().is_some());
    }
}
