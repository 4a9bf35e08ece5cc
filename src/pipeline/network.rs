use crate::error::ConfpackError;
use std::fmt;
use std::str::FromStr;

/// Network topology a release package is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
	HubAndSpoke,
	SharedVpc,
}

impl NetworkType {
	pub const ALL: [NetworkType; 2] = [NetworkType::HubAndSpoke, NetworkType::SharedVpc];

	/// Name used on the command line and as the overlay folder name.
	pub fn as_str(&self) -> &'static str {
		match self {
			NetworkType::HubAndSpoke => "hub-and-spoke",
			NetworkType::SharedVpc => "shared-vpc",
		}
	}
}

impl fmt::Display for NetworkType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NetworkType {
	type Err = ConfpackError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		NetworkType::ALL
			.into_iter()
			.find(|n| n.as_str() == s)
			.ok_or_else(|| ConfpackError::UnknownNetworkType {
				value: s.to_string(),
			})
	}
}
