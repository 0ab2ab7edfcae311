//! Background map generation on a pool of worker threads.
//!
//! Jobs are independent: each worker runs [`generate`] on its own request and
//! sends the finished grid back through a bounded channel. Results are
//! bit-identical to calling [`generate`] directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use delve_grid::Grid;

use crate::{GenerationError, GenerationRequest, generate};

/// Caller-chosen identifier for a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

/// A request to generate one map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationJob {
    /// Identifier echoed back on the result.
    pub id: JobId,
    /// What to generate.
    pub request: GenerationRequest,
}

/// A finished job.
#[derive(Debug)]
pub struct GeneratedMap {
    /// The job identifier.
    pub id: JobId,
    /// The generated grid, or why generation failed.
    pub result: Result<Grid, GenerationError>,
    /// Generation time in microseconds.
    pub generation_time_us: u64,
}

struct QueuedJob {
    job: GenerationJob,
    cancelled: Arc<AtomicBool>,
}

/// Runs generation jobs on background threads.
pub struct GenerationPool {
    job_sender: Sender<QueuedJob>,
    result_receiver: Receiver<GeneratedMap>,
    active_jobs: Arc<DashMap<JobId, Arc<AtomicBool>>>,
    in_flight: Arc<AtomicU64>,
}

impl GenerationPool {
    /// Creates a pool.
    ///
    /// # Arguments
    /// - `thread_count`: number of worker threads.
    /// - `max_queued`: jobs that may wait for a worker; further submissions
    ///   are rejected.
    /// - `result_capacity`: finished maps buffered until drained.
    ///
    /// # Errors
    ///
    /// Returns the OS error if a worker thread cannot be spawned.
    pub fn new(
        thread_count: usize,
        max_queued: usize,
        result_capacity: usize,
    ) -> std::io::Result<Self> {
        let (job_sender, job_receiver) = bounded::<QueuedJob>(max_queued);
        let (result_sender, result_receiver) = bounded::<GeneratedMap>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for index in 0..thread_count.max(1) {
            let receiver = job_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);

            std::thread::Builder::new()
                .name(format!("map-gen-{index}"))
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        if queued.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = Instant::now();
                        let result = generate(&queued.job.request);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if let Err(err) = &result {
                            tracing::warn!(id = queued.job.id.0, %err, "map generation failed");
                        }

                        if !queued.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(GeneratedMap {
                                id: queued.job.id,
                                result,
                                generation_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })?;
        }

        Ok(Self {
            job_sender,
            result_receiver,
            active_jobs: Arc::new(DashMap::new()),
            in_flight,
        })
    }

    /// Creates a pool sized to the machine, leaving a core for the caller.
    pub fn with_defaults() -> std::io::Result<Self> {
        let threads = num_cpus::get().saturating_sub(1).max(1);
        Self::new(threads, 64, 128)
    }

    /// Queues a job.
    ///
    /// Returns the job back if the queue is full.
    pub fn submit(&self, job: GenerationJob) -> Result<(), GenerationJob> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_jobs.insert(job.id, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        self.job_sender
            .try_send(QueuedJob { job, cancelled })
            .map_err(|e| {
                self.in_flight.fetch_sub(1, Ordering::Relaxed);
                let job = e.into_inner().job;
                self.active_jobs.remove(&job.id);
                job
            })
    }

    /// Cancels a pending or running job. Finished jobs are unaffected.
    pub fn cancel(&self, id: JobId) {
        if let Some((_, cancelled)) = self.active_jobs.remove(&id) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Collects every finished map without blocking.
    pub fn drain_results(&self) -> Vec<GeneratedMap> {
        let mut results = Vec::new();
        while let Ok(map) = self.result_receiver.try_recv() {
            self.active_jobs.remove(&map.id);
            results.push(map);
        }
        results
    }

    /// Jobs queued or running.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` while a job with this id has been submitted and its
    /// result not yet drained.
    pub fn is_pending(&self, id: JobId) -> bool {
        self.active_jobs.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{AlgorithmKind, FillParams, Seed};

    fn job(id: u64, kind: AlgorithmKind) -> GenerationJob {
        GenerationJob {
            id: JobId(id),
            request: GenerationRequest {
                width: 48,
                height: 32,
                seed: Seed(id as f64),
                algorithm: kind.default_algorithm(),
            },
        }
    }

    fn collect(pool: &GenerationPool, expected: usize) -> Vec<GeneratedMap> {
        let mut results = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(30);
        while results.len() < expected && Instant::now() < deadline {
            results.extend(pool.drain_results());
            if results.len() < expected {
                std::thread::sleep(Duration::from_millis(5));
            }
        }
        results
    }

    #[test]
    fn test_pool_matches_direct_generation() {
        let pool = GenerationPool::new(4, 32, 64).unwrap();
        let jobs: Vec<_> = AlgorithmKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, kind)| job(i as u64, kind))
            .collect();
        for job in &jobs {
            pool.submit(*job).unwrap();
        }

        let results = collect(&pool, jobs.len());
        assert_eq!(results.len(), jobs.len());
        for map in results {
            let job = jobs.iter().find(|j| j.id == map.id).unwrap();
            let expected = generate(&job.request).unwrap();
            assert_eq!(map.result.unwrap(), expected, "job {:?}", map.id);
        }
        assert!(!pool.is_pending(JobId(0)));
    }

    #[test]
    fn test_pool_reports_errors() {
        let pool = GenerationPool::new(1, 4, 4).unwrap();
        let mut bad = job(7, AlgorithmKind::RandomFill);
        bad.request.algorithm = crate::Algorithm::RandomFill(FillParams {
            fill_percentage: -1.0,
            borders: true,
        });
        pool.submit(bad).unwrap();

        let results = collect(&pool, 1);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].result,
            Err(GenerationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_in_flight_drops_to_zero() {
        let pool = GenerationPool::new(2, 16, 16).unwrap();
        for i in 0..5 {
            pool.submit(job(i, AlgorithmKind::RandomWalk)).unwrap();
        }

        let deadline = Instant::now() + Duration::from_secs(10);
        while pool.in_flight_count() > 0 && Instant::now() < deadline {
            let _ = pool.drain_results();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(pool.in_flight_count(), 0);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let pool = GenerationPool::new(1, 16, 16).unwrap();
        pool.submit(job(1, AlgorithmKind::Tunnel)).unwrap();
        assert!(pool.is_pending(JobId(1)));
        pool.cancel(JobId(1));
        assert!(!pool.is_pending(JobId(1)));
        // A job that finished before the cancel may still report.
        std::thread::sleep(Duration::from_millis(50));
        assert!(pool.drain_results().len() <= 1);
    }
}
