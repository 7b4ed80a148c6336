//! The BIP32 version bytes this crate recognises.
//!
//! The table is a `static` slice so nothing can add to it or change it at runtime. Monacoin and
//! Kumacoin serialise extended keys with Bitcoin's version bytes, so a lookup of those values
//! returns the Bitcoin entry (the first match). [`aliases`] lists every coin that shares a version.
use core::fmt;

/// A coin whose extended keys are in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    #[allow(missing_docs)]
    Bitcoin,
    #[allow(missing_docs)]
    Litecoin,
    #[allow(missing_docs)]
    Dogecoin,
    #[allow(missing_docs)]
    Monacoin,
    #[allow(missing_docs)]
    Kumacoin,
}

impl Coin {
    /// The lowercase name, e.g. `"bitcoin"`.
    pub fn name(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Litecoin => "litecoin",
            Coin::Dogecoin => "dogecoin",
            Coin::Monacoin => "monacoin",
            Coin::Kumacoin => "kumacoin",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mainnet or testnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    #[allow(missing_docs)]
    Mainnet,
    #[allow(missing_docs)]
    Testnet,
}

impl Network {
    /// `"mainnet"` or `"testnet"`.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a 4-byte version tells you about an extended key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionInfo {
    /// The version as a big-endian `u32`.
    pub version: u32,
    /// The coin.
    pub coin: Coin,
    /// The network.
    pub network: Network,
    /// Whether the key material is a private key.
    pub is_private: bool,
}

const fn entry(version: u32, coin: Coin, network: Network, is_private: bool) -> VersionInfo {
    VersionInfo {
        version,
        coin,
        network,
        is_private,
    }
}

use Coin::*;
use Network::*;

/// All 20 entries: five coins, two networks, public and private.
pub static VERSION_TABLE: [VersionInfo; 20] = [
    entry(0x0488_B21E, Bitcoin, Mainnet, false),
    entry(0x0488_ADE4, Bitcoin, Mainnet, true),
    entry(0x0435_87CF, Bitcoin, Testnet, false),
    entry(0x0435_8394, Bitcoin, Testnet, true),
    entry(0x019D_A462, Litecoin, Mainnet, false),
    entry(0x019D_9CFE, Litecoin, Mainnet, true),
    entry(0x0436_F6E1, Litecoin, Testnet, false),
    entry(0x0436_EF7D, Litecoin, Testnet, true),
    entry(0x02FA_CAFD, Dogecoin, Mainnet, false),
    entry(0x02FA_C398, Dogecoin, Mainnet, true),
    entry(0x0432_A9A8, Dogecoin, Testnet, false),
    entry(0x0432_A243, Dogecoin, Testnet, true),
    entry(0x0488_B21E, Monacoin, Mainnet, false),
    entry(0x0488_ADE4, Monacoin, Mainnet, true),
    entry(0x0435_87CF, Monacoin, Testnet, false),
    entry(0x0435_8394, Monacoin, Testnet, true),
    entry(0x0488_B21E, Kumacoin, Mainnet, false),
    entry(0x0488_ADE4, Kumacoin, Mainnet, true),
    entry(0x0435_87CF, Kumacoin, Testnet, false),
    entry(0x0435_8394, Kumacoin, Testnet, true),
];

/// Finds the first entry for `version`.
///
/// ```
/// use echo_keys::version_table::{lookup, Coin, Network};
/// let info = lookup(0x0488_ADE4).unwrap();
/// assert_eq!((info.coin, info.network, info.is_private), (Coin::Bitcoin, Network::Mainnet, true));
/// assert!(lookup(0xdead_beef).is_none());
/// ```
pub fn lookup(version: u32) -> Option<&'static VersionInfo> {
    VERSION_TABLE.iter().find(|info| info.version == version)
}

/// Every coin that uses `version`, in table order.
pub fn aliases(version: u32) -> impl Iterator<Item = Coin> {
    VERSION_TABLE
        .iter()
        .filter(move |info| info.version == version)
        .map(|info| info.coin)
}
