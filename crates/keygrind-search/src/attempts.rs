//! The lazy, unbounded sequence of search attempts.

use crate::source::KeySource;
use keygrind_identity::Keypair;

/// One generated candidate.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// 1-based position in the sequence.
    pub number: u64,
    /// The candidate keypair.
    pub keypair: Keypair,
    /// The candidate's base58 address.
    pub address: String,
}

/// An infinite iterator of numbered candidates drawn from a [`KeySource`].
///
/// Nothing is generated until the iterator is advanced.
pub struct Attempts<'a, S: ?Sized> {
    source: &'a mut S,
    generated: u64,
}

impl<'a, S: KeySource + ?Sized> Attempts<'a, S> {
    /// Wraps `source`.
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            generated: 0,
        }
    }

    /// Number of candidates generated so far.
    #[must_use]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Generates and renders the next candidate.
    pub fn next_attempt(&mut self) -> Attempt {
        let keypair = self.source.next_keypair();
        let address = keypair.address();
        self.generated += 1;

        Attempt {
            number: self.generated,
            keypair,
            address,
        }
    }
}

impl<S: KeySource + ?Sized> Iterator for Attempts<'_, S> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        Some(self.next_attempt())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
