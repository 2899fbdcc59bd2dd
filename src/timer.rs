use std::future::Future;
use std::time::Instant;

/// A computation's result paired with how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub res: T,
    /// Wall-clock seconds from just before the call until it completed.
    pub elapsed: f64,
}

/// Run `f` once and measure it.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let res = f();
    Timed {
        res,
        elapsed: start.elapsed().as_secs_f64(),
    }
}

/// Run a fallible `f` once and measure it.
///
/// An `Err` is returned exactly as `f` produced it; no elapsed time is
/// reported for a failed computation.
pub fn try_timed<T, E>(f: impl FnOnce() -> Result<T, E>) -> Result<Timed<T>, E> {
    let start = Instant::now();
    let res = f()?;
    Ok(Timed {
        res,
        elapsed: start.elapsed().as_secs_f64(),
    })
}

/// Await the future produced by `f` and measure it.
///
/// The clock starts before `f` is called, so any synchronous work `f` does
/// before returning its future is included.
pub async fn timed_async<F, Fut, T>(f: F) -> Timed<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let start = Instant::now();
    let res = f().await;
    Timed {
        res,
        elapsed: start.elapsed().as_secs_f64(),
    }
}

/// Await a fallible future produced by `f` and measure it.
pub async fn try_timed_async<F, Fut, T, E>(f: F) -> Result<Timed<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let res = f().await?;
    Ok(Timed {
        res,
        elapsed: start.elapsed().as_secs_f64(),
    })
}
