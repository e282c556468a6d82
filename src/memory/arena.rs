//! Fixed-capacity linear allocator with O(1) reset.
//!
//! An [`Arena`] is one contiguous byte region with a bump offset. Two
//! lifetimes exist: a persistent arena that is only rewound at explicit
//! checkpoints, and a frame arena that is rewound once at the start of every
//! frame.
//!
//! Allocations are addressed through [`ArenaRef`] handles carrying the
//! arena's reset epoch. Resolving a handle after the arena has been reset
//! returns `None` instead of reading bytes that now belong to someone else.

use std::fmt;

use thiserror::Error;

/// Largest capacity an arena is configured with
pub const MAX_ARENA_BYTES: usize = u32::MAX as usize;

/// How long allocations from an arena live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaLifetime {
    /// Lives for the process; reset only at explicit checkpoints
    Persistent,
    /// Reset at the start of every frame
    Frame,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena capacity exceeded: requested {requested} bytes, {remaining} remaining")]
    CapacityExceeded { requested: usize, remaining: usize },

    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),
}

/// Handle to bytes allocated from an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRef {
    offset: usize,
    len: usize,
    epoch: u32,
}

impl ArenaRef {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

pub struct Arena {
    lifetime: ArenaLifetime,
    /// Backing storage, allocated to full capacity at creation and never
    /// reallocated
    memory: Vec<u8>,
    offset: usize,
    /// Incremented by every reset that discards at least one allocation
    epoch: u32,
    /// Allocations made since the last reset
    live_allocations: usize,
    high_water: usize,
}

impl Arena {
    pub fn new(lifetime: ArenaLifetime, capacity: usize) -> Self {
        Self {
            lifetime,
            memory: vec![0; capacity],
            offset: 0,
            epoch: 0,
            live_allocations: 0,
            high_water: 0,
        }
    }

    pub fn lifetime(&self) -> ArenaLifetime {
        self.lifetime
    }

    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    pub fn used(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.memory.len() - self.offset
    }

    /// Largest offset reached since creation
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Reserve `len` bytes at an offset aligned to `align`.
    ///
    /// Fails without side effects when the region cannot hold the request.
    /// The returned bytes are NOT zeroed; they may hold data from before the
    /// last reset.
    pub fn alloc(&mut self, len: usize, align: usize) -> Result<ArenaRef, ArenaError> {
        let align = align.max(1);
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment(align));
        }

        let remaining = self.remaining();
        let exceeded = ArenaError::CapacityExceeded {
            requested: len,
            remaining,
        };
        let aligned = self
            .offset
            .checked_add(align - 1)
            .map(|o| o & !(align - 1))
            .ok_or_else(|| exceeded.clone())?;
        let end = aligned.checked_add(len).ok_or_else(|| exceeded.clone())?;
        if end > self.memory.len() {
            tracing::warn!(
                "{:?} arena exhausted: requested {} bytes, {} of {} remaining",
                self.lifetime,
                len,
                remaining,
                self.capacity()
            );
            return Err(exceeded);
        }

        self.offset = end;
        self.high_water = self.high_water.max(end);
        self.live_allocations += 1;
        Ok(ArenaRef {
            offset: aligned,
            len,
            epoch: self.epoch,
        })
    }

    /// Reserve bytes and zero them
    pub fn alloc_zeroed(&mut self, len: usize, align: usize) -> Result<ArenaRef, ArenaError> {
        let r = self.alloc(len, align)?;
        let start = r.offset;
        self.memory[start..start + len].fill(0);
        Ok(r)
    }

    /// Copy a string into the arena
    pub fn alloc_str(&mut self, s: &str) -> Result<ArenaRef, ArenaError> {
        let r = self.alloc(s.len(), 1)?;
        let start = r.offset;
        self.memory[start..start + s.len()].copy_from_slice(s.as_bytes());
        Ok(r)
    }

    /// Format directly into the arena without an intermediate heap string.
    ///
    /// On overflow the partial write is rolled back and the offset is left
    /// where it was.
    pub fn alloc_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<ArenaRef, ArenaError> {
        let start = self.offset;
        let mut writer = ArenaWriter {
            arena: self,
            overflow: None,
        };
        let written = fmt::write(&mut writer, args);
        let overflow = writer.overflow.take();

        if written.is_err() || overflow.is_some() {
            self.offset = start;
            tracing::warn!(
                "{:?} arena exhausted while formatting: {} of {} bytes remaining",
                self.lifetime,
                self.remaining(),
                self.capacity()
            );
            return Err(overflow.unwrap_or(ArenaError::CapacityExceeded {
                requested: 0,
                remaining: self.remaining(),
            }));
        }

        self.high_water = self.high_water.max(self.offset);
        self.live_allocations += 1;
        Ok(ArenaRef {
            offset: start,
            len: self.offset - start,
            epoch: self.epoch,
        })
    }

    /// Resolve a handle; `None` if it predates the last reset
    pub fn bytes(&self, r: ArenaRef) -> Option<&[u8]> {
        if r.epoch != self.epoch {
            return None;
        }
        let start = r.offset;
        self.memory.get(start..start + r.len)
    }

    pub fn bytes_mut(&mut self, r: ArenaRef) -> Option<&mut [u8]> {
        if r.epoch != self.epoch {
            return None;
        }
        let start = r.offset;
        self.memory.get_mut(start..start + r.len)
    }

    /// Resolve a handle created by `alloc_str`/`alloc_fmt`
    pub fn str(&self, r: ArenaRef) -> Option<&str> {
        self.bytes(r).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Rewind the offset to zero in O(1) without touching the backing memory.
    ///
    /// Every outstanding [`ArenaRef`] becomes stale. Resetting an arena that
    /// holds no allocations changes nothing, so back-to-back resets are
    /// equivalent to one.
    pub fn reset(&mut self) {
        if self.live_allocations > 0 {
            self.epoch = self.epoch.wrapping_add(1);
        }
        self.offset = 0;
        self.live_allocations = 0;
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("lifetime", &self.lifetime)
            .field("capacity", &self.capacity())
            .field("used", &self.offset)
            .field("epoch", &self.epoch)
            .finish()
    }
}

struct ArenaWriter<'a> {
    arena: &'a mut Arena,
    overflow: Option<ArenaError>,
}

impl fmt::Write for ArenaWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let start = self.arena.offset;
        let end = start + s.len();
        if end > self.arena.memory.len() {
            self.overflow = Some(ArenaError::CapacityExceeded {
                requested: s.len(),
                remaining: self.arena.remaining(),
            });
            return Err(fmt::Error);
        }
        self.arena.memory[start..end].copy_from_slice(s.as_bytes());
        self.arena.offset = end;
        Ok(())
    }
}
