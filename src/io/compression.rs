//! Transparent compression for corpus inputs and outputs.
//!
//! Raw corpora are often shipped compressed (`part-0001.json.gz`). Readers in
//! this crate go through [`auto_detect_reader`], which unwraps a compressed
//! stream when either the file extension or the leading magic bytes identify
//! a known codec. Writers go through [`auto_detect_writer`], which compresses
//! only when the output extension asks for it.
//!
//! ## Built-in codecs
//!
//! - **Gzip** (`.gz`): `flate2` (feature `compression-gzip`)
//! - **Zstd** (`.zst`): `zstd` (feature `compression-zstd`)
//! - **Bzip2** (`.bz2`): `bzip2` (feature `compression-bzip2`)
//! - **Xz** (`.xz`): `xz2` (feature `compression-xz`)
//!
//! Extra codecs can be plugged in with [`register_codec`].
//!
//! ```no_run
//! use ironcorpus::io::compression::auto_detect_reader;
//! use std::fs::File;
//! # fn main() -> std::io::Result<()> {
//! let file = File::open("shard.json.gz")?;
//! let reader = auto_detect_reader(file, "shard.json.gz")?;
//! # Ok(())
//! # }
//! ```

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

static CODEC_REGISTRY: RwLock<Vec<Arc<dyn CompressionCodec>>> = RwLock::new(Vec::new());

/// A compression algorithm that can wrap readers and writers.
///
/// Implementations are stored in a process-wide registry, hence `Send + Sync`.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g. "gzip").
    fn name(&self) -> &str;

    /// Lowercase file extensions with the leading dot (e.g. `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Magic byte signature, if the format has a reliable one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>>;

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn FinishWrite>>;
}

/// A writer that must be finished explicitly.
///
/// Encoders write their trailer in `finish`. Dropping one instead silently
/// discards a failed trailer write, so every output path calls `finish`.
pub trait FinishWrite: Write {
    /// Flush buffered data, write any trailer, and flush the underlying writer.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

impl<W: Write + ?Sized> FinishWrite for Box<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let mut writer = *self;
        writer.flush()
    }
}

impl<W: Write> FinishWrite for BufWriter<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let mut inner = (*self).into_inner().map_err(io::IntoInnerError::into_error)?;
        inner.flush()
    }
}

#[cfg(feature = "compression-gzip")]
impl<W: Write> FinishWrite for flate2::write::GzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        flate2::write::GzEncoder::finish(*self)?.flush()
    }
}

#[cfg(feature = "compression-zstd")]
impl<W: Write> FinishWrite for zstd::stream::write::Encoder<'static, W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        zstd::stream::write::Encoder::finish(*self)?.flush()
    }
}

#[cfg(feature = "compression-bzip2")]
impl<W: Write> FinishWrite for bzip2::write::BzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        bzip2::write::BzEncoder::finish(*self)?.flush()
    }
}

#[cfg(feature = "compression-xz")]
impl<W: Write> FinishWrite for xz2::write::XzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        xz2::write::XzEncoder::finish(*self)?.flush()
    }
}

/// Register a custom codec; it is consulted after the built-in ones.
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(codec);
}

fn codecs() -> Vec<Arc<dyn CompressionCodec>> {
    let mut all: Vec<Arc<dyn CompressionCodec>> = BuiltinCodec::ENABLED
        .iter()
        .map(|c| Arc::new(*c) as Arc<dyn CompressionCodec>)
        .collect();
    all.extend(
        CODEC_REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned(),
    );
    all
}

/// Name of the codec a path's extension selects, if any.
pub fn codec_name_for(path: impl AsRef<Path>) -> Option<String> {
    detect_from_extension(path).map(|c| c.name().to_string())
}

fn detect_from_extension(path: impl AsRef<Path>) -> Option<Arc<dyn CompressionCodec>> {
    let name = path.as_ref().to_string_lossy().to_lowercase();
    codecs()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| name.ends_with(ext)))
}

/// Peeks the buffered reader without advancing it.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Arc<dyn CompressionCodec>> {
    let head = reader.fill_buf().ok()?;
    if head.is_empty() {
        return None;
    }
    codecs().into_iter().find(|codec| {
        codec
            .magic_bytes()
            .is_some_and(|magic| head.starts_with(magic))
    })
}

/// Wrap `reader` with a decompressor when the extension or magic bytes ask for one.
///
/// Extension is checked first; magic bytes are the fallback, so a gzip shard
/// saved as `part.json` still reads correctly.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn Read>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec.wrap_reader_dyn(Box::new(reader));
    }

    let mut buffered = BufReader::new(reader);
    match detect_from_magic(&mut buffered) {
        Some(codec) => codec.wrap_reader_dyn(Box::new(buffered)),
        None => Ok(Box::new(buffered)),
    }
}

/// Wrap `writer` with a compressor when the output extension asks for one,
/// otherwise with a plain `BufWriter`.
///
/// Call [`FinishWrite::finish`] when done; dropping the writer can lose the
/// tail of the output without an error.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn FinishWrite>> {
    match detect_from_extension(&path_hint) {
        Some(codec) => codec.wrap_writer_dyn(Box::new(writer)),
        None => Ok(Box::new(BufWriter::new(writer))),
    }
}

#[derive(Clone, Copy, Debug)]
enum BuiltinCodec {
    #[cfg(feature = "compression-gzip")]
    Gzip,
    #[cfg(feature = "compression-zstd")]
    Zstd,
    #[cfg(feature = "compression-bzip2")]
    Bzip2,
    #[cfg(feature = "compression-xz")]
    Xz,
}

impl BuiltinCodec {
    const ENABLED: &'static [BuiltinCodec] = &[
        #[cfg(feature = "compression-gzip")]
        BuiltinCodec::Gzip,
        #[cfg(feature = "compression-zstd")]
        BuiltinCodec::Zstd,
        #[cfg(feature = "compression-bzip2")]
        BuiltinCodec::Bzip2,
        #[cfg(feature = "compression-xz")]
        BuiltinCodec::Xz,
    ];
}

#[allow(unreachable_code, unused_variables)]
impl CompressionCodec for BuiltinCodec {
    fn name(&self) -> &str {
        match *self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => "gzip",
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => "zstd",
            #[cfg(feature = "compression-bzip2")]
            Self::Bzip2 => "bzip2",
            #[cfg(feature = "compression-xz")]
            Self::Xz => "xz",
        }
    }

    fn extensions(&self) -> &[&str] {
        match *self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => &[".gz", ".gzip"],
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => &[".zst", ".zstd"],
            #[cfg(feature = "compression-bzip2")]
            Self::Bzip2 => &[".bz2", ".bzip2"],
            #[cfg(feature = "compression-xz")]
            Self::Xz => &[".xz"],
        }
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        match *self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Some(&[0x1f, 0x8b]),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Some(&[0x28, 0xb5, 0x2f, 0xfd]),
            // "BZh": the bare "BZ" prefix also starts plain-text lines.
            #[cfg(feature = "compression-bzip2")]
            Self::Bzip2 => Some(b"BZh"),
            #[cfg(feature = "compression-xz")]
            Self::Xz => Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]),
        }
    }

    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        match *self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(reader)?)),
            #[cfg(feature = "compression-bzip2")]
            Self::Bzip2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
            #[cfg(feature = "compression-xz")]
            Self::Xz => Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader))),
        }
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn FinishWrite>> {
        match *self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(Box::new(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            ))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Ok(Box::new(zstd::stream::write::Encoder::new(writer, 3)?)),
            #[cfg(feature = "compression-bzip2")]
            Self::Bzip2 => Ok(Box::new(bzip2::write::BzEncoder::new(
                writer,
                bzip2::Compression::default(),
            ))),
            #[cfg(feature = "compression-xz")]
            Self::Xz => Ok(Box::new(xz2::write::XzEncoder::new(writer, 6))),
        }
    }
}
