use fxhash::FxHashMap;

/// Addresses and words share one type. Wide enough that real images never overflow it.
pub type Word = u128;

/// Sparse word-addressed memory image.
///
/// Addresses that were never loaded read as zero.
#[derive(Clone, Default, Debug)]
pub struct Memory {
    words: FxHashMap<Word, Word>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            words: FxHashMap::default(),
        }
    }

    /// Read the word at `addr`, or 0 if nothing was loaded there.
    pub fn get(&self, addr: Word) -> Word {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Insert or overwrite a word. Only used while building the image.
    pub fn load(&mut self, addr: Word, value: Word) {
        self.words.insert(addr, value);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Loaded words in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (Word, Word)> + '_ {
        let mut entries: Vec<(Word, Word)> = self.words.iter().map(|(&a, &v)| (a, v)).collect();
        entries.sort_unstable_by_key(|&(addr, _)| addr);
        entries.into_iter()
    }
}

impl FromIterator<(Word, Word)> for Memory {
    fn from_iter<I: IntoIterator<Item = (Word, Word)>>(iter: I) -> Self {
        let mut mem = Memory::new();
        for (addr, value) in iter {
            mem.load(addr, value);
        }
        mem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_reads_zero() {
        let mem = Memory::new();
        assert!(mem.is_empty());
        for addr in [0, 1, 0x0A, 0xFFFF, Word::MAX] {
            assert_eq!(mem.get(addr), 0);
        }
    }

    #[test]
    fn load_overwrites() {
        let mut mem = Memory::new();
        mem.load(0x20, 0x07);
        mem.load(0x20, 0x08);
        assert_eq!(mem.get(0x20), 0x08);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn values_are_not_truncated() {
        let mem: Memory = [(0x1_0000_0000, 0xDEAD_BEEF_CAFE)].into_iter().collect();
        assert_eq!(mem.get(0x1_0000_0000), 0xDEAD_BEEF_CAFE);
        assert_eq!(mem.get(0), 0);
    }

    #[test]
    fn iter_is_sorted() {
        let mem: Memory = [(0x1000, 0x55), (0x0A, 0x1000), (0x20, 0x07)]
            .into_iter()
            .collect();
        assert_eq!(
            mem.iter().collect::<Vec<_>>(),
            vec![(0x0A, 0x1000), (0x20, 0x07), (0x1000, 0x55)]
        );
    }
}
