// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use std::{cmp::Ordering, fmt};

/// A version number of the SPIR-V language or of a client API.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Patch version number.
    pub patch: u32,
}

impl Version {
    pub const V1_0: Version = Version::major_minor(1, 0);
    pub const V1_1: Version = Version::major_minor(1, 1);
    pub const V1_2: Version = Version::major_minor(1, 2);
    pub const V1_3: Version = Version::major_minor(1, 3);
    pub const V1_4: Version = Version::major_minor(1, 4);
    pub const V1_5: Version = Version::major_minor(1, 5);
    pub const V1_6: Version = Version::major_minor(1, 6);

    /// Constructs a `Version` from the given major and minor version numbers.
    #[inline]
    pub const fn major_minor(major: u32, minor: u32) -> Version {
        Version {
            major,
            minor,
            patch: 0,
        }
    }

    /// Decodes the version word found in the header of a SPIR-V module.
    ///
    /// The word is laid out as `0 | major | minor | 0`, one byte each.
    #[inline]
    pub const fn from_spirv_word(word: u32) -> Version {
        Version {
            major: (word & 0x00ff0000) >> 16,
            minor: (word & 0x0000ff00) >> 8,
            patch: 0,
        }
    }

    /// Encodes the version as the word found in the header of a SPIR-V module.
    ///
    /// Returns `None` if the major or minor number does not fit in a byte.
    #[inline]
    pub const fn to_spirv_word(self) -> Option<u32> {
        if self.major > 0xff || self.minor > 0xff {
            return None;
        }

        Some((self.major << 16) | (self.minor << 8))
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Self {
        Self::V1_0
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => (),
            o => return o,
        };

        match self.minor.cmp(&other.minor) {
            Ordering::Equal => (),
            o => return o,
        };

        self.patch.cmp(&other.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::Version;

    #[test]
    fn spirv_word() {
        assert_eq!(Version::from_spirv_word(0x00010300), Version::V1_3);
        assert_eq!(Version::V1_5.to_spirv_word(), Some(0x00010500));
        assert_eq!(Version::major_minor(1, 256).to_spirv_word(), None);
    }

    #[test]
    fn greater_major() {
        let v1 = Version::major_minor(1, 6);
        let v2 = Version::major_minor(2, 0);
        assert!(v2 > v1);
    }

    #[test]
    fn greater_minor() {
        assert!(Version::V1_4 > Version::V1_3);
    }

    #[test]
    fn greater_patch() {
        let v1 = Version {
            major: 1,
            minor: 1,
            patch: 2,
        };
        let v2 = Version {
            major: 1,
            minor: 1,
            patch: 3,
        };
        assert!(v2 > v1);
    }

    #[test]
    fn display() {
        assert_eq!(Version::V1_2.to_string(), "1.2");
        assert_eq!(format!("{:?}", Version::V1_2), "1.2.0");
    }
}
