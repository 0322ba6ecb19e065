use std::time::Duration;

/// Backoff policy for [`retry_async_with_config`].
///
/// `max_attempts` counts the first call, so `max_attempts == 4` means one
/// attempt plus three retries.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    pub jitter_max: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(3000),
            jitter_max: Some(Duration::from_millis(100)),
        }
    }
}

impl RetryConfig {
    /// Same delay between every attempt, no jitter.
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            base_backoff: delay,
            max_backoff: delay,
            jitter_max: None,
        }
    }
}

pub async fn retry_async_with_config<F, Fut, T, E>(config: RetryConfig, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut attempts_left = config.max_attempts.max(1);
    let mut backoff = config.base_backoff;
    let mut attempt = 0usize;

    loop {
        attempt += 1;
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(e);
                }

                let wait = match config.jitter_max {
                    Some(jitter_max) if !jitter_max.is_zero() => {
                        let jitter_ms = jitter_max.as_millis() as u64;
                        backoff + Duration::from_millis(rand::random::<u64>() % (jitter_ms + 1))
                    }
                    _ => backoff,
                };
                tracing::debug!(
                    "Attempt {}/{} failed, retrying in {:?}",
                    attempt,
                    config.max_attempts,
                    wait
                );
                tokio::time::sleep(wait).await;

                backoff = std::cmp::min(backoff * 2, config.max_backoff);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn retry_succeeds_after_retries() {
        let counter = AtomicUsize::new(0);
        let cfg = RetryConfig::fixed(3, Duration::from_millis(1));

        let res: Result<usize, &'static str> = retry_async_with_config(cfg, || async {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err("fail")
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(res, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_fails_after_max_attempts() {
        let counter = AtomicUsize::new(0);
        let cfg = RetryConfig {
            max_attempts: 2,
            base_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(10),
            jitter_max: None,
        };

        let res: Result<(), &'static str> = retry_async_with_config(cfg, || async {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("always fail")
        })
        .await;

        assert!(res.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_backoff_waits_between_attempts() {
        let counter = AtomicUsize::new(0);
        let started = tokio::time::Instant::now();
        let cfg = RetryConfig::fixed(4, Duration::from_secs(2));

        let res: Result<(), &'static str> = retry_async_with_config(cfg, || async {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
        .await;

        assert!(res.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        assert!(started.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let counter = AtomicUsize::new(0);
        let cfg = RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        };
        let res: Result<(), &'static str> = retry_async_with_config(cfg, || async {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("nope")
        })
        .await;
        assert!(res.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn jitter_stays_within_bound() {
        let cfg = RetryConfig {
            max_attempts: 2,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(100),
            jitter_max: Some(Duration::from_millis(50)),
        };
        let started = tokio::time::Instant::now();
        let res: Result<(), &'static str> =
            retry_async_with_config(cfg, || async { Err("nope") }).await;

        assert!(res.is_err());
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(100));
        assert!(waited <= Duration::from_millis(150));
    }
}
