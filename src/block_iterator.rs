use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const BLOCK_SIZE: usize = 64 * 1024;

/// Reads any source in fixed-size blocks. The final block may be shorter.
pub struct BlockIterator<R: Read> {
    reader: R,
    block_size: usize,
}

impl<R: Read> BlockIterator<R> {
    pub fn new(reader: R) -> Self {
        Self::with_block_size(reader, BLOCK_SIZE)
    }

    pub fn with_block_size(reader: R, block_size: usize) -> Self {
        BlockIterator {
            reader,
            block_size: block_size.max(1),
        }
    }
}

impl<R: Read> Iterator for BlockIterator<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buffer = vec![0u8; self.block_size];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => return None,
                Ok(n) => {
                    buffer.truncate(n);
                    return Some(Ok(buffer));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Iterates over the given file in `BLOCK_SIZE` blocks.
pub fn iter_file_blocks<P: AsRef<Path>>(path: P) -> io::Result<BlockIterator<File>> {
    let file = File::open(path)?;
    Ok(BlockIterator::new(file))
}
