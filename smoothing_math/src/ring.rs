//! Fixed-capacity circular storage for smoothing state
//!
//! A `RingBuffer` is addressed by absolute timestep. The slot for timestep
//! `t` is `t % capacity`, so writing step `t` overwrites step `t - capacity`.
//! History older than `capacity` steps is unrecoverable and the buffer
//! never grows.

use crate::{MathError, Result};

/// Circular buffer indexed by `timestep mod capacity`
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    slots: Vec<f64>,
}

impl RingBuffer {
    /// Create a zero-filled buffer holding `capacity` timesteps
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MathError::InvalidInput(
                "Ring buffer capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            slots: vec![0.0; capacity],
        })
    }

    /// Create a buffer of `capacity` whose first slots hold `seed`
    ///
    /// Timesteps `0..seed.len()` read back the seed values.
    pub fn seeded(capacity: usize, seed: &[f64]) -> Result<Self> {
        if seed.len() > capacity {
            return Err(MathError::InvalidInput(format!(
                "Seed of {} values does not fit in a ring of {}",
                seed.len(),
                capacity
            )));
        }

        let mut ring = Self::new(capacity)?;
        ring.slots[..seed.len()].copy_from_slice(seed);
        Ok(ring)
    }

    /// Number of timesteps retained
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Value stored for `timestep`
    #[inline]
    pub fn get(&self, timestep: usize) -> f64 {
        self.slots[timestep % self.slots.len()]
    }

    /// Store `value` for `timestep`, evicting `timestep - capacity`
    #[inline]
    pub fn set(&mut self, timestep: usize, value: f64) {
        let capacity = self.slots.len();
        self.slots[timestep % capacity] = value;
    }

    /// Reset every slot to zero
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = 0.0);
    }

    /// Raw slot contents in storage order
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }
}
