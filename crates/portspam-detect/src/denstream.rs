//! DenStream: online density-based micro-cluster stream clustering with
//! exponential time decay (spec.md §4.5). Cao, F. et al., "Density-Based
//! Clustering over an Evolving Data Stream with Noise", SDM 2006 — the
//! algorithm this module is a streaming-bit-detector specialization of.

use portspam_timing::Sample;
use portspam_utils::ArrayVec;

use crate::error::DetectError;
use crate::micro_cluster::MicroCluster;

pub const MAX_CLUSTER: usize = 1000;

pub struct DenStreamState {
    pub p_clusters: ArrayVec<MicroCluster, MAX_CLUSTER>,
    pub o_clusters: ArrayVec<MicroCluster, MAX_CLUSTER>,
    pub lambda: f64,
    pub eps: f64,
    pub beta: f64,
    pub mu: f64,
    pub t: u64,
    tp: Option<u64>,
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn nearest(clusters: &[MicroCluster], s: Sample) -> Option<usize> {
    clusters
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance(a.center, (s.x, s.y))
                .partial_cmp(&distance(b.center, (s.x, s.y)))
                .unwrap()
        })
        .map(|(i, _)| i)
}

impl DenStreamState {
    pub fn new(lambda: f64, eps: f64, beta: f64, mu: f64) -> Self {
        Self {
            p_clusters: ArrayVec::new(),
            o_clusters: ArrayVec::new(),
            lambda,
            eps,
            beta,
            mu,
            t: 0,
            tp: if lambda > 0.0 { Some(5) } else { None },
        }
    }

    /// Feeds one sample through the potential/outlier pipeline, applies
    /// periodic pruning, and advances the discrete clock (spec.md §4.5).
    pub fn partial_fit(&mut self, s: Sample) -> Result<bool, DetectError> {
        let p_changed = self.try_insert(s)?;
        self.maybe_prune();
        self.t += 1;
        Ok(p_changed)
    }

    fn try_insert(&mut self, s: Sample) -> Result<bool, DetectError> {
        if let Some(i) = nearest(&self.p_clusters, s) {
            let mut candidate = self.p_clusters[i];
            candidate.insert_sample(s);
            if candidate.radius().is_some_and(|r| r < self.eps) {
                self.p_clusters[i] = candidate;
                return Ok(true);
            }
        }

        if let Some(i) = nearest(&self.o_clusters, s) {
            let mut candidate = self.o_clusters[i];
            candidate.insert_sample(s);
            if candidate.radius().is_some_and(|r| r < self.eps) {
                self.o_clusters[i] = candidate;
                if candidate.weight > self.beta * self.mu {
                    let promoted = self.o_clusters.remove(i);
                    if self.p_clusters.is_full() {
                        return Err(DetectError::PotentialClusterCapacityExceeded(MAX_CLUSTER));
                    }
                    self.p_clusters.push(promoted);
                    return Ok(true);
                }
                return Ok(false);
            }
        }

        if self.o_clusters.is_full() {
            return Err(DetectError::OutlierClusterCapacityExceeded(MAX_CLUSTER));
        }
        let mut fresh = MicroCluster::new(self.lambda, self.t);
        fresh.insert_sample(s);
        self.o_clusters.push(fresh);
        Ok(false)
    }

    fn maybe_prune(&mut self) {
        let Some(tp) = self.tp else { return };
        if self.t % tp != 0 {
            return;
        }

        let beta_mu = self.beta * self.mu;
        self.p_clusters.retain(|c| c.weight >= beta_mu);

        let t = self.t;
        let lambda = self.lambda;
        let decay = |tau: f64| 2f64.powf(-lambda * tau);
        let denom = decay(tp as f64) - 1.0;
        self.o_clusters.retain(|c| {
            let age = (t - c.creation_time + tp) as f64;
            let xi = (decay(age) - 1.0) / denom;
            c.weight >= xi
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(x: f64, y: f64) -> Sample {
        Sample { x, y }
    }

    #[test]
    fn clock_advances_by_one_per_call() {
        let mut ds = DenStreamState::new(0.25, 5.0, 1.0, 2.0);
        ds.partial_fit(sample_at(0.0, 100.0)).unwrap();
        assert_eq!(ds.t, 1);
        ds.partial_fit(sample_at(1.0, 100.0)).unwrap();
        assert_eq!(ds.t, 2);
    }

    #[test]
    fn lambda_zero_disables_pruning() {
        let mut ds = DenStreamState::new(0.0, 5.0, 1.0, 1000.0);
        for i in 0..20 {
            ds.partial_fit(sample_at(i as f64, 100.0)).unwrap();
        }
        assert!(!ds.o_clusters.is_empty());
    }

    #[test]
    fn close_samples_form_one_growing_cluster() {
        let mut ds = DenStreamState::new(0.25, 50.0, 1.0, 1.0);
        for i in 0..10 {
            ds.partial_fit(sample_at(i as f64, 100.0)).unwrap();
        }
        assert!(ds.p_clusters.len() + ds.o_clusters.len() <= 10);
        let total_points: u64 = ds
            .p_clusters
            .iter()
            .chain(ds.o_clusters.iter())
            .map(|c| c.point_number)
            .sum();
        assert_eq!(total_points, 10);
    }

    #[test]
    fn lists_never_exceed_max_cluster() {
        let mut ds = DenStreamState::new(0.25, 0.0001, 1.0, 1_000_000.0);
        for i in 0..500 {
            ds.partial_fit(sample_at(i as f64 * 1000.0, i as f64 * 1000.0)).unwrap();
        }
        assert!(ds.p_clusters.len() <= MAX_CLUSTER);
        assert!(ds.o_clusters.len() <= MAX_CLUSTER);
    }
}
