//! Host status snapshot published by the frame thread.
//!
//! Auxiliary threads (an input-polling thread, an embedding UI) read the
//! latest snapshot instead of reaching into host state. The whole
//! snapshot packs into one `u64` so publication is a single atomic store.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostStatus {
    pub initialized: bool,
    pub resumed: bool,
    pub session_active: bool,
    /// Frames submitted since bootstrap, wrapping at u32::MAX.
    pub frame_index: u32,
}

impl HostStatus {
    fn pack(self) -> u64 {
        let mut bits = (self.frame_index as u64) << 32;
        if self.initialized {
            bits |= 1;
        }
        if self.resumed {
            bits |= 1 << 1;
        }
        if self.session_active {
            bits |= 1 << 2;
        }
        bits
    }

    fn unpack(bits: u64) -> Self {
        Self {
            initialized: bits & 1 != 0,
            resumed: bits & (1 << 1) != 0,
            session_active: bits & (1 << 2) != 0,
            frame_index: (bits >> 32) as u32,
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusCell(AtomicU64);

impl StatusCell {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn publish(&self, status: HostStatus) {
        self.0.store(status.pack(), Ordering::Release);
    }

    pub fn load(&self) -> HostStatus {
        HostStatus::unpack(self.0.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_roundtrip() {
        let status = HostStatus {
            initialized: true,
            resumed: false,
            session_active: true,
            frame_index: 0xDEAD_BEEF,
        };
        assert_eq!(HostStatus::unpack(status.pack()), status);
    }

    #[test]
    fn test_cell_starts_inactive() {
        let cell = StatusCell::new();
        let status = cell.load();
        assert!(!status.initialized);
        assert!(!status.session_active);
        assert_eq!(status.frame_index, 0);
    }

    #[test]
    fn test_publish_overwrites() {
        let cell = StatusCell::new();
        cell.publish(HostStatus {
            initialized: true,
            resumed: true,
            session_active: false,
            frame_index: 7,
        });
        cell.publish(HostStatus {
            initialized: true,
            resumed: true,
            session_active: true,
            frame_index: 8,
        });
        let status = cell.load();
        assert!(status.session_active);
        assert_eq!(status.frame_index, 8);
    }
}
