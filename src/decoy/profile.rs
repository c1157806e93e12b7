//! Fake service identities and their banner corpora.
//!
//! Each decoy session impersonates one of five services. The identity is
//! chosen uniformly at random per connection, independent of whatever
//! protocol the client actually speaks; within an identity the greeting
//! banner is again uniform over that service's corpus.

use rand::seq::SliceRandom;
use rand::Rng;

const SSH_BANNERS: &[&str] = &[
    "SSH-2.0-OpenSSH_8.2p1 Ubuntu-4ubuntu0.5\r\n",
    "SSH-2.0-OpenSSH_7.4 Debian-10+deb9u7\r\n",
    "SSH-2.0-OpenSSH_8.0 FreeBSD-20200214\r\n",
    "SSH-2.0-OpenSSH_7.9 CentOS-7.9\r\n",
    "SSH-2.0-OpenSSH_8.1 RedHat-8.1\r\n",
    "SSH-2.0-OpenSSH_6.7p1 Debian-5+deb8u4\r\n",
    "SSH-2.0-OpenSSH_7.6p1 Ubuntu-4ubuntu0.3\r\n",
    "SSH-2.0-OpenSSH_8.4p1 Arch Linux\r\n",
];

const HTTP_BANNERS: &[&str] = &[
    "HTTP/1.1 200 OK\r\nServer: nginx/1.18.0 (Ubuntu)\r\n\r\n",
    "HTTP/1.1 200 OK\r\nServer: Apache/2.4.41 (Debian)\r\n\r\n",
    "HTTP/1.1 200 OK\r\nServer: Microsoft-IIS/10.0\r\n\r\n",
    "HTTP/1.1 200 OK\r\nServer: nginx/1.20.1\r\n\r\n",
];

const MYSQL_BANNERS: &[&str] = &[
    "\x0a5.7.35-0ubuntu0.18.04.1\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00",
    "\x0a8.0.27-0ubuntu0.20.04.1\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00",
    "\x0a10.3.34-MariaDB-1:10.3.34+maria~focal\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00",
];

const REDIS_BANNERS: &[&str] = &[
    "$6\r\nRedis\r\n",
    "$7\r\nRedis 6.2.6\r\n",
    "$7\r\nRedis 5.0.7\r\n",
];

const FTP_BANNERS: &[&str] = &[
    "220 ProFTPD 1.3.6 Server (ProFTPD Default Installation) [::ffff:192.168.1.1]\r\n",
    "220 (vsFTPd 3.0.3)\r\n",
    "220 Microsoft FTP Service\r\n",
];

/// How a decoy session interacts after the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionStrategy {
    /// Shell-style read loop: log every line, reject every command.
    LineOriented,
    /// One request read, one fixed response, done.
    SingleExchange,
}

/// A fake service identity carried by one decoy session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceProfile {
    /// OpenSSH lookalike.
    Ssh,
    /// Generic web server.
    Http,
    /// MySQL / MariaDB handshake.
    MySql,
    /// Redis RESP greeting.
    Redis,
    /// Classic FTP greeting.
    Ftp,
}

impl ServiceProfile {
    /// Every configured identity.
    pub const ALL: [ServiceProfile; 5] = [
        ServiceProfile::Ssh,
        ServiceProfile::Http,
        ServiceProfile::MySql,
        ServiceProfile::Redis,
        ServiceProfile::Ftp,
    ];

    /// Pick an identity uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&ServiceProfile::Ssh)
    }

    /// The banner corpus for this identity.
    pub fn banners(&self) -> &'static [&'static str] {
        match self {
            ServiceProfile::Ssh => SSH_BANNERS,
            ServiceProfile::Http => HTTP_BANNERS,
            ServiceProfile::MySql => MYSQL_BANNERS,
            ServiceProfile::Redis => REDIS_BANNERS,
            ServiceProfile::Ftp => FTP_BANNERS,
        }
    }

    /// Pick a greeting uniformly from this identity's corpus.
    pub fn pick_banner<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.banners().choose(rng).copied().unwrap_or(SSH_BANNERS[0])
    }

    /// The interaction strategy after the banner.
    ///
    /// Only HTTP gets the single-exchange treatment; everything else falls
    /// back to the shell-style line loop.
    pub fn strategy(&self) -> InteractionStrategy {
        match self {
            ServiceProfile::Http => InteractionStrategy::SingleExchange,
            _ => InteractionStrategy::LineOriented,
        }
    }
}

impl std::fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceProfile::Ssh => write!(f, "SSH"),
            ServiceProfile::Http => write!(f, "HTTP"),
            ServiceProfile::MySql => write!(f, "MYSQL"),
            ServiceProfile::Redis => write!(f, "REDIS"),
            ServiceProfile::Ftp => write!(f, "FTP"),
        }
    }
}

/// Look up a banner corpus by service key.
///
/// Unrecognized keys fall back to the SSH corpus.
pub fn banner_corpus_for_key(key: &str) -> &'static [&'static str] {
    match key {
        "ssh" => SSH_BANNERS,
        "http" => HTTP_BANNERS,
        "mysql" => MYSQL_BANNERS,
        "redis" => REDIS_BANNERS,
        "ftp" => FTP_BANNERS,
        _ => SSH_BANNERS,
    }
}
