use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::str::FromStr;

use log::{info, warn};

use crate::bitstream::bitstring::BitString;
use crate::bitstream::container::{read_archive, write_archive, Archive};
use crate::compression::compress::compress;
use crate::compression::decompress::decompress;
use crate::error::{AtError, Result};
use crate::huffman_coding::huffman::{huf_decode, huf_encode};
use crate::tools::cli::{AtOpts, Mode};

/// Carry out whatever the command line asked for.
pub fn run(opts: &AtOpts) -> Result<()> {
    match opts.op_mode {
        Mode::Compress => compress_file(opts),
        Mode::Decompress => decompress_file(opts),
        Mode::Encode => encode_file(opts),
        Mode::Decode => decode_file(opts),
    }
}

/// Compress the input file into an archive at the output path.
pub fn compress_file(opts: &AtOpts) -> Result<()> {
    let data = fs::read(&opts.input)?;
    info!("Read {} bytes from {}", data.len(), opts.input.display());

    let (payload, table) = compress(&data, opts.use_transform)?;
    let archive = Archive {
        use_transform: opts.use_transform,
        text: false,
        table,
        payload,
    };
    let written = write_archive(&mut BufWriter::new(File::create(&opts.output)?), &archive)?;

    info!(
        "Wrote {} bytes to {} (ratio {:.2})",
        written,
        opts.output.display(),
        data.len() as f64 / written as f64
    );
    Ok(())
}

/// Restore the original file from an archive written by compress_file().
pub fn decompress_file(opts: &AtOpts) -> Result<()> {
    let archive = read_archive(&mut BufReader::new(File::open(&opts.input)?))?;
    if archive.text {
        return Err(AtError::Format(
            "archive holds a text payload; decode it with -w".to_string(),
        ));
    }
    // The archive records whether the transform was used, so that wins over the flag
    if archive.use_transform && !opts.use_transform {
        warn!("Archive was written with the transform stages on; ignoring the binary flag.");
    }

    let data = decompress(&archive.payload, archive.table, archive.use_transform)?;
    fs::write(&opts.output, &data)?;
    info!("Wrote {} bytes to {}", data.len(), opts.output.display());
    Ok(())
}

/// Huffman-code the input file, print the bits as text, and store them in a text archive.
pub fn encode_file(opts: &AtOpts) -> Result<()> {
    let data = fs::read(&opts.input)?;
    let (bits, table) = huf_encode(&data);
    let text = bits.to_string();
    println!("{}", text);

    let archive = Archive {
        use_transform: false,
        text: true,
        table,
        payload: text.into_bytes(),
    };
    let written = write_archive(&mut BufWriter::new(File::create(&opts.output)?), &archive)?;
    info!(
        "Encoded {} bytes as {} bits, {} archive bytes written",
        data.len(),
        bits.len(),
        written
    );
    Ok(())
}

/// Decode a text archive written by encode_file(), print it, and write the bytes out.
pub fn decode_file(opts: &AtOpts) -> Result<()> {
    let archive = read_archive(&mut BufReader::new(File::open(&opts.input)?))?;
    if !archive.text {
        return Err(AtError::Format(
            "archive holds packed bits; decompress it with -d".to_string(),
        ));
    }
    let text = std::str::from_utf8(&archive.payload)
        .map_err(|_| AtError::Format("text payload is not valid UTF-8".to_string()))?;
    let bits = BitString::from_str(text)?;

    let data = huf_decode(&bits, &archive.table)?;
    println!("{}", String::from_utf8_lossy(&data));
    fs::write(&opts.output, &data)?;
    info!("Decoded {} bits into {} bytes", bits.len(), data.len());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::run;
    use crate::error::AtError;
    use crate::tools::cli::{AtOpts, Mode, Verbosity};
    use std::fs;
    use std::path::Path;

    fn opts(op_mode: Mode, input: &Path, output: &Path, use_transform: bool) -> AtOpts {
        AtOpts {
            op_mode,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            use_transform,
            verbose: Verbosity::Quiet,
        }
    }

    #[test]
    fn compress_decompress_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("peter.txt");
        let archive = dir.path().join("peter.atz");
        let output = dir.path().join("peter.out");
        let text = "Peter Piper picked a peck of pickled peppers. ".repeat(20);
        fs::write(&input, &text).unwrap();

        run(&opts(Mode::Compress, &input, &archive, true)).unwrap();
        assert!(fs::metadata(&archive).unwrap().len() < text.len() as u64);

        // The stored transform flag wins over -b
        run(&opts(Mode::Decompress, &archive, &output, false)).unwrap();
        assert_eq!(fs::read(&output).unwrap(), text.as_bytes());
    }

    #[test]
    fn binary_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.bin");
        let archive = dir.path().join("data.atz");
        let output = dir.path().join("data.out");
        let data = (0..=255_u8).cycle().take(3000).collect::<Vec<u8>>();
        fs::write(&input, &data).unwrap();

        // Holds the sentinel, so only binary mode accepts it
        assert!(matches!(
            run(&opts(Mode::Compress, &input, &archive, true)),
            Err(AtError::Validation { .. })
        ));
        run(&opts(Mode::Compress, &input, &archive, false)).unwrap();
        run(&opts(Mode::Decompress, &archive, &output, false)).unwrap();
        assert_eq!(fs::read(&output).unwrap(), data);
    }

    #[test]
    fn encode_decode_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("msg.txt");
        let archive = dir.path().join("msg.atz");
        let output = dir.path().join("msg.out");
        fs::write(&input, "mississippi river").unwrap();

        run(&opts(Mode::Encode, &input, &archive, true)).unwrap();
        // A text archive is not for -d, and a packed archive is not for -w
        assert!(matches!(
            run(&opts(Mode::Decompress, &archive, &output, true)),
            Err(AtError::Format(_))
        ));
        run(&opts(Mode::Decode, &archive, &output, true)).unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"mississippi river");

        run(&opts(Mode::Compress, &input, &archive, true)).unwrap();
        assert!(matches!(
            run(&opts(Mode::Decode, &archive, &output, true)),
            Err(AtError::Format(_))
        ));
    }

    #[test]
    fn empty_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let archive = dir.path().join("empty.atz");
        let output = dir.path().join("empty.out");
        fs::write(&input, b"").unwrap();

        run(&opts(Mode::Compress, &input, &archive, true)).unwrap();
        // Header, one table entry for the sentinel, pad metadata and length
        assert!(fs::metadata(&archive).unwrap().len() >= 16);
        run(&opts(Mode::Decompress, &archive, &output, true)).unwrap();
        assert!(fs::read(&output).unwrap().is_empty());
    }

    #[test]
    fn missing_input_test() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let output = dir.path().join("nope.atz");
        assert!(matches!(
            run(&opts(Mode::Compress, &missing, &output, true)),
            Err(AtError::Io(_))
        ));
    }
}
