//! Container and chunk headers shared by the WAVE and AIFF readers

use crate::error::PipelineError;
use crate::model::Endianness;
use binrw::{BinRead, Endian};
use std::io::Cursor;

/// Size of the outer `RIFF`/`FORM` header
const FORM_HEADER_SIZE: usize = 12;

/// Size of every chunk header (id + length)
const CHUNK_HEADER_SIZE: usize = 8;

pub(crate) fn binrw_endian(endianness: Endianness) -> Endian {
    match endianness {
        Endianness::Little => Endian::Little,
        Endianness::Big => Endian::Big,
    }
}

/// Map a header read failure to the pipeline's error kind
pub(crate) fn header_error(what: &str, err: binrw::Error) -> PipelineError {
    PipelineError::CorruptInput(format!("malformed {} header: {}", what, err))
}

/// Read one fixed-layout header struct from the start of `bytes`
pub(crate) fn read_header<T>(bytes: &[u8], endianness: Endianness, what: &str) -> Result<T, PipelineError>
where
    T: for<'a> BinRead<Args<'a> = ()>,
{
    T::read_options(&mut Cursor::new(bytes), binrw_endian(endianness), ())
        .map_err(|e| header_error(what, e))
}

/// Outer `RIFF`/`RIFX`/`FORM` header
#[derive(BinRead, Debug)]
pub(crate) struct FormHeader {
    #[br(pad_before = 4)]
    pub size: u32,
    pub form: [u8; 4],
}

impl FormHeader {
    pub fn parse(bytes: &[u8], endianness: Endianness) -> Result<Self, PipelineError> {
        read_header(bytes, endianness, "container")
    }

    /// Chunk area after the form type, bounded by the declared size
    pub fn body<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        let declared_end = (self.size as usize).saturating_add(CHUNK_HEADER_SIZE);
        let end = declared_end.min(bytes.len()).max(FORM_HEADER_SIZE);
        &bytes[FORM_HEADER_SIZE..end]
    }
}

#[derive(BinRead, Debug)]
struct ChunkHeader {
    id: [u8; 4],
    size: u32,
}

/// A chunk id and its body
#[derive(Debug)]
pub(crate) struct Chunk<'a> {
    pub id: [u8; 4],
    pub body: &'a [u8],
}

impl Chunk<'_> {
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

/// Split a chunk area into chunks
///
/// Chunks are word aligned: an odd-sized body is followed by one pad byte.
/// A trailing fragment shorter than a chunk header is ignored.
pub(crate) fn read_chunks(area: &[u8], endianness: Endianness) -> Result<Vec<Chunk<'_>>, PipelineError> {
    let mut chunks = Vec::new();
    let mut pos = 0usize;

    while area.len() - pos >= CHUNK_HEADER_SIZE {
        let header: ChunkHeader = read_header(&area[pos..], endianness, "chunk")?;
        let start = pos + CHUNK_HEADER_SIZE;
        let size = header.size as usize;
        let available = area.len() - start;

        if size > available {
            return Err(PipelineError::CorruptInput(format!(
                "chunk '{}' declares {} bytes but only {} remain",
                String::from_utf8_lossy(&header.id),
                size,
                available
            )));
        }

        chunks.push(Chunk {
            id: header.id,
            body: &area[start..start + size],
        });

        pos = start + size + (size & 1);
        if pos > area.len() {
            break;
        }
    }

    Ok(chunks)
}

/// Find the first chunk with the given id
pub(crate) fn find_chunk<'a, 'b>(chunks: &'b [Chunk<'a>], id: &[u8; 4]) -> Option<&'b Chunk<'a>> {
    chunks.iter().find(|c| &c.id == id)
}
