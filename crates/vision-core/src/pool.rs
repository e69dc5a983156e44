//! Slot arena for photon records.
//!
//! Beams create and retire photons every frame. Records live in one arena
//! owned by the beam and the beam keeps only slot indices. A retired slot goes
//! on the free list and the next `acquire` overwrites it in place, so a beam
//! in steady state never grows its storage.
//!
//! At most `capacity` idle slots are kept: once more are free, trailing idle
//! slots are dropped from the arena. Running out of free slots is not an
//! error, `acquire` grows the arena by one default record.

/// Arena owned by exactly one beam.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<T>,
    occupied: Vec<bool>,
    free: Vec<usize>,
    capacity: usize,
    fresh_allocations: usize,
}

impl<T: Default> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            occupied: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            capacity,
            fresh_allocations: 0,
        }
    }

    /// Arena with `initial` idle slots ready, so a beam switching on does not
    /// grow its storage.
    pub fn prefilled(capacity: usize, initial: usize) -> Self {
        let mut pool = Self::new(capacity);
        let initial = initial.min(capacity);
        pool.slots.resize_with(initial, T::default);
        pool.occupied.resize(initial, false);
        pool.free.extend((0..initial).rev());
        pool
    }

    /// Take a slot (recycled when available) and let `init` overwrite its record.
    pub fn acquire(&mut self, init: impl FnOnce(&mut T)) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.fresh_allocations += 1;
                self.slots.push(T::default());
                self.occupied.push(false);
                self.slots.len() - 1
            }
        };
        self.occupied[slot] = true;
        init(&mut self.slots[slot]);
        slot
    }

    /// Return a retired slot to the free list.
    pub fn release(&mut self, slot: usize) {
        debug_assert!(self.occupied[slot], "slot {slot} released twice");
        self.occupied[slot] = false;
        self.free.push(slot);
        self.trim();
    }

    pub fn release_all(&mut self, slots: impl IntoIterator<Item = usize>) {
        for slot in slots {
            self.release(slot);
        }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> &T {
        &self.slots[slot]
    }

    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> &mut T {
        &mut self.slots[slot]
    }

    /// Number of idle slots ready for reuse.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots held by the arena, live and idle.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// How many times `acquire` had to grow the arena because no slot was free.
    pub fn fresh_allocations(&self) -> usize {
        self.fresh_allocations
    }

    // Drop trailing idle slots while more than `capacity` are idle. Idle slots
    // in the middle stay on the free list until a later trim reaches them.
    fn trim(&mut self) {
        let mut idle = self.free.len();
        while idle > self.capacity && self.occupied.last() == Some(&false) {
            self.slots.pop();
            self.occupied.pop();
            idle -= 1;
        }
        if idle != self.free.len() {
            let len = self.slots.len();
            self.free.retain(|&slot| slot < len);
        }
    }
}
