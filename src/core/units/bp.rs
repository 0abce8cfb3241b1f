//! Branch predictor: pattern history table plus branch target buffer.
//!
//! The PHT is a direct-mapped, tagged table of saturating counters
//! (one-bit or two-bit, per configuration) indexed by PC. The BTB is a
//! direct-mapped, tagged table of resolved targets. Fetch redirects to the
//! BTB target when the counter predicts taken and the BTB hits; execute
//! updates both tables with the actual outcome.

/// Width of the PHT saturating counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorKind {
    /// One-bit counters: remember the last outcome.
    OneBit,
    /// Two-bit counters: require two misses in a row to flip direction.
    TwoBit,
}

#[derive(Clone, Copy, Default)]
struct PhtEntry {
    tag: u32,
    counter: u8,
    valid: bool,
}

#[derive(Clone, Copy, Default)]
struct BtbEntry {
    tag: u32,
    target: u32,
    valid: bool,
}

/// Branch predictor state.
pub struct BranchPredictor {
    kind: PredictorKind,
    pht: Vec<PhtEntry>,
    btb: Vec<BtbEntry>,
    /// Number of predictions made at fetch.
    pub predictions: u64,
    /// Number of predictions execute later proved wrong.
    pub mispredictions: u64,
}

impl BranchPredictor {
    /// Creates a predictor with the given table sizes. Sizes must be
    /// powers of two.
    pub fn new(kind: PredictorKind, pht_size: usize, btb_size: usize) -> Self {
        Self {
            kind,
            pht: vec![PhtEntry::default(); pht_size],
            btb: vec![BtbEntry::default(); btb_size],
            predictions: 0,
            mispredictions: 0,
        }
    }

    fn pht_index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.pht.len() - 1)
    }

    fn btb_index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.btb.len() - 1)
    }

    fn taken_threshold(&self) -> u8 {
        match self.kind {
            PredictorKind::OneBit => 1,
            PredictorKind::TwoBit => 2,
        }
    }

    fn counter_max(&self) -> u8 {
        match self.kind {
            PredictorKind::OneBit => 1,
            PredictorKind::TwoBit => 3,
        }
    }

    /// Direction prediction for a conditional branch. Misses and cold
    /// entries predict not-taken.
    pub fn predict_taken(&self, pc: u32) -> bool {
        let e = self.pht[self.pht_index(pc)];
        e.valid && e.tag == pc && e.counter >= self.taken_threshold()
    }

    /// Target prediction from the BTB.
    pub fn predict_target(&self, pc: u32) -> Option<u32> {
        let e = self.btb[self.btb_index(pc)];
        if e.valid && e.tag == pc {
            Some(e.target)
        } else {
            None
        }
    }

    /// Updates the tables with a resolved outcome. The counter saturates;
    /// the BTB learns the target of taken control flow.
    pub fn update(&mut self, pc: u32, taken: bool, target: Option<u32>) {
        let counter_max = self.counter_max();
        let idx = self.pht_index(pc);
        let e = &mut self.pht[idx];
        if !e.valid || e.tag != pc {
            *e = PhtEntry {
                tag: pc,
                counter: 0,
                valid: true,
            };
        }
        if taken {
            e.counter = (e.counter + 1).min(counter_max);
        } else {
            e.counter = e.counter.saturating_sub(1);
        }

        if taken {
            if let Some(target) = target {
                let idx = self.btb_index(pc);
                self.btb[idx] = BtbEntry {
                    tag: pc,
                    target,
                    valid: true,
                };
            }
        }
    }

    /// Prediction accuracy in percent, in `[0, 100]`.
    pub fn accuracy(&self) -> f64 {
        if self.predictions == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.mispredictions as f64 / self.predictions as f64)
    }

    /// Forgets all learned state but keeps the configuration.
    pub fn reset(&mut self) {
        self.pht.iter_mut().for_each(|e| *e = PhtEntry::default());
        self.btb.iter_mut().for_each(|e| *e = BtbEntry::default());
        self.predictions = 0;
        self.mispredictions = 0;
    }
}
