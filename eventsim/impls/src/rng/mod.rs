mod wyhash;

pub use self::wyhash::WyHash;

#[cfg(test)]
pub(crate) mod dummy;
