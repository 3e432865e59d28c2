//! Policies that pick which CDN host serves an asset.

/// Trait describing how an asset path is mapped onto one of the configured CDN hosts.
pub trait HostSelection {
    /// Index into a host list of length `host_count` for `input`.
    ///
    /// Called only with `host_count > 0`; the result must be below `host_count`.
    fn host_index(&self, input: &str, host_count: usize) -> usize;
}

/// Default shard policy: CRC-32 (IEEE) of the input bytes modulo the host count.
///
/// CRC-32 gives the same value on every machine and every run, so an asset keeps its host
/// across rebuilds and stays warm in that edge's cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32Sharding;

impl Crc32Sharding {
    /// Checksum the shard index is derived from.
    pub fn checksum(input: &str) -> u32 {
        crc32fast::hash(input.as_bytes())
    }
}

impl HostSelection for Crc32Sharding {
    fn host_index(&self, input: &str, host_count: usize) -> usize {
        let checksum = u64::from(Self::checksum(input));
        // host_count <= usize::MAX, so the remainder always fits back into usize
        (checksum % host_count as u64) as usize
    }
}

/// Select a host from `hosts` for `input`, or `None` when the list is empty.
pub fn select_host<'h, S: HostSelection + ?Sized>(
    policy: &S,
    input: &str,
    hosts: &'h [String],
) -> Option<(usize, &'h str)> {
    if hosts.is_empty() {
        return None;
    }
    let index = policy.host_index(input, hosts.len());
    hosts.get(index).map(|host| (index, host.as_str()))
}
