//! Cached sensor-cloud acquisition.
//!
//! A mutex/condvar pair guards the cloud cache independently of the planning
//! session lock, so the feed side can publish while a solve is in flight.
//! Subscriptions are transient: publishers only hand clouds over while at
//! least one waiter is registered, and a waiter deregisters as soon as one
//! fresh cloud is captured.

use crate::cloud::PointCloud;
use crate::error::{MargaError, Result};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Slot {
    cloud: Option<Arc<PointCloud>>,
    /// Requests currently blocked waiting for the next cloud
    waiters: usize,
    /// Bumped on every accepted publish; waiters watch for a change
    generation: u64,
}

/// Mutex/condvar guarded cloud cache.
pub struct CloudCache {
    slot: Mutex<Slot>,
    fresh: Condvar,
}

impl CloudCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::default()),
            fresh: Condvar::new(),
        }
    }

    /// Offer a cloud. Consumed (and cached) only while a waiter is
    /// registered; otherwise dropped. Returns whether it was consumed.
    pub fn publish(&self, cloud: PointCloud) -> bool {
        let mut slot = self.lock_slot();
        if slot.waiters == 0 {
            return false;
        }
        slot.cloud = Some(Arc::new(cloud));
        slot.generation += 1;
        drop(slot);
        self.fresh.notify_all();
        true
    }

    /// Return the cached cloud if younger than `freshness`, else wait for
    /// the next published cloud, bounded by `timeout`.
    pub fn acquire(&self, freshness: Duration, timeout: Duration) -> Result<Arc<PointCloud>> {
        let mut slot = self.lock_slot();

        if let Some(cloud) = &slot.cloud {
            if cloud.stamp.elapsed() <= freshness {
                return Ok(Arc::clone(cloud));
            }
        }

        let seen = slot.generation;
        slot.waiters += 1;
        let deadline = Instant::now() + timeout;
        while slot.generation == seen {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                slot.waiters -= 1;
                return Err(MargaError::SensorTimeout);
            }
            slot = match self.fresh.wait_timeout(slot, remaining) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        slot.waiters -= 1;

        slot.cloud
            .as_ref()
            .map(Arc::clone)
            .ok_or(MargaError::SensorTimeout)
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for CloudCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_without_waiter_is_dropped() {
        let cache = CloudCache::new();
        assert!(!cache.publish(PointCloud::new(vec![[0.0, 0.0, 0.0]])));
    }

    #[test]
    fn test_acquire_times_out() {
        let cache = CloudCache::new();
        let start = Instant::now();
        let result = cache.acquire(Duration::from_millis(100), Duration::from_millis(50));
        assert!(matches!(result, Err(MargaError::SensorTimeout)));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_acquire_receives_published_cloud() {
        let cache = Arc::new(CloudCache::new());
        let publisher = Arc::clone(&cache);
        let handle = thread::spawn(move || {
            // Retry until the waiter has registered
            loop {
                if publisher.publish(PointCloud::new(vec![[1.0, 2.0, 3.0]])) {
                    break;
                }
                thread::sleep(Duration::from_millis(5));
            }
        });

        let cloud = cache
            .acquire(Duration::from_millis(100), Duration::from_secs(5))
            .unwrap();
        assert_eq!(cloud.points, vec![[1.0, 2.0, 3.0]]);
        handle.join().unwrap();
    }

    #[test]
    fn test_fresh_cloud_is_reused_without_wait() {
        let cache = Arc::new(CloudCache::new());
        let publisher = Arc::clone(&cache);
        let handle = thread::spawn(move || loop {
            if publisher.publish(PointCloud::new(vec![[0.0, 0.0, 0.0]])) {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        });
        let first = cache
            .acquire(Duration::from_millis(0), Duration::from_secs(5))
            .unwrap();
        handle.join().unwrap();

        // Generous freshness window: the cached cloud comes back immediately
        let second = cache
            .acquire(Duration::from_secs(60), Duration::from_millis(1))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_two_waiters_both_wake_on_one_publish() {
        let cache = Arc::new(CloudCache::new());
        let mut waiters = Vec::new();
        for _ in 0..2 {
            let cache = Arc::clone(&cache);
            waiters.push(thread::spawn(move || {
                cache.acquire(Duration::from_millis(0), Duration::from_secs(5))
            }));
        }

        let done = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let publisher = {
            let cache = Arc::clone(&cache);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(std::sync::atomic::Ordering::Relaxed) {
                    cache.publish(PointCloud::new(vec![[0.0, 0.0, 1.0]]));
                    thread::sleep(Duration::from_millis(5));
                }
            })
        };

        for waiter in waiters {
            assert!(waiter.join().unwrap().is_ok());
        }
        done.store(true, std::sync::atomic::Ordering::Relaxed);
        publisher.join().unwrap();
    }
}
