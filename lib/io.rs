//! Reading and writing gradient waveforms as raw binary.
//!
//! The x and y components are written back to back as native-endian `f64`s,
//! with no header or length prefix. The number of samples must be known to the
//! reader by other means.

use std::{
    fs,
    io::{ self, BufReader, BufWriter, Read, Write },
    path::Path,
};
use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, VdsError },
};

const F64_BYTES: usize = std::mem::size_of::<f64>();

pub type IoResult<T> = Result<T, VdsError>;

fn write_array<S, W>(arr: &Arr1<S>, w: &mut W) -> io::Result<()>
where
    S: nd::Data<Elem = f64>,
    W: Write,
{
    arr.iter().try_for_each(|x| w.write_all(&x.to_ne_bytes()))
}

fn read_array<R>(n: usize, r: &mut R) -> io::Result<nd::Array1<f64>>
where R: Read
{
    let mut buf = [0_u8; F64_BYTES];
    (0..n)
        .map(|_| -> io::Result<f64> {
            r.read_exact(&mut buf)?;
            Ok(f64::from_ne_bytes(buf))
        })
        .collect()
}

/// Write `gx` followed by `gy` to any writer.
pub fn write_raw_to<S, T, W>(gx: &Arr1<S>, gy: &Arr1<T>, mut w: W)
    -> IoResult<()>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    W: Write,
{
    LengthError::check(gx, gy)?;
    write_array(gx, &mut w)?;
    write_array(gy, &mut w)?;
    w.flush()?;
    Ok(())
}

/// Read `n` samples of each of `gx` and `gy` from any reader.
///
/// Returns an error if the reader holds fewer than `2 n` values; trailing data
/// is not checked.
pub fn read_raw_from<R>(n: usize, mut r: R)
    -> IoResult<(nd::Array1<f64>, nd::Array1<f64>)>
where R: Read
{
    let gx = read_array(n, &mut r)?;
    let gy = read_array(n, &mut r)?;
    Ok((gx, gy))
}

/// Write a gradient waveform to a file, creating or truncating it.
pub fn write_raw<P, S, T>(path: P, gx: &Arr1<S>, gy: &Arr1<T>)
    -> IoResult<()>
where
    P: AsRef<Path>,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let file = fs::File::create(path)?;
    write_raw_to(gx, gy, BufWriter::new(file))
}

/// Read a gradient waveform of `n` samples from a file.
///
/// The file must hold exactly `2 n` values; otherwise a [`LengthError`] is
/// returned with the number of values expected and the number found (rounded
/// down to whole values).
pub fn read_raw<P>(path: P, n: usize)
    -> IoResult<(nd::Array1<f64>, nd::Array1<f64>)>
where P: AsRef<Path>
{
    let file = fs::File::open(path)?;
    let bytes = file.metadata()?.len() as usize;
    let found = bytes / F64_BYTES;
    let expected
        = n.checked_mul(2 * F64_BYTES)
        .ok_or(LengthError(n.saturating_mul(2), found))?;
    if bytes != expected {
        return Err(LengthError(2 * n, found).into());
    }
    read_raw_from(n, BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{ check, let_assert };

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("vdspiral-{}-{}", std::process::id(), name))
    }

    #[test]
    fn layout_is_back_to_back() {
        let gx = nd::array![1.0, 2.0];
        let gy = nd::array![-1.0, 0.5];
        let mut buf: Vec<u8> = Vec::new();
        let_assert!(Ok(()) = write_raw_to(&gx, &gy, &mut buf));
        check!(buf.len() == 4 * F64_BYTES);
        let expected: Vec<u8>
            = [1.0_f64, 2.0, -1.0, 0.5].iter()
            .flat_map(|x| x.to_ne_bytes())
            .collect();
        check!(buf == expected);
    }

    #[test]
    fn reader_reads_back() {
        let gx = nd::array![0.25, -3.0, 7.5];
        let gy = nd::array![1e-3, 0.0, -2.0];
        let mut buf: Vec<u8> = Vec::new();
        let_assert!(Ok(()) = write_raw_to(&gx, &gy, &mut buf));
        let_assert!(Ok((rx, ry)) = read_raw_from(3, buf.as_slice()));
        check!(rx == gx);
        check!(ry == gy);
    }

    #[test]
    fn short_reader() {
        let buf = vec![0_u8; 3 * F64_BYTES];
        let_assert!(Err(VdsError::Io(_)) = read_raw_from(2, buf.as_slice()));
    }

    #[test]
    fn unequal_components() {
        let gx = nd::array![1.0, 2.0];
        let gy = nd::array![1.0];
        let mut buf: Vec<u8> = Vec::new();
        let_assert!(
            Err(VdsError::Length(LengthError(2, 1)))
                = write_raw_to(&gx, &gy, &mut buf)
        );
        check!(buf.is_empty());
    }

    #[test]
    fn file_round_trip_and_length_check() {
        let path = temp_path("io-test");
        let gx = nd::array![1.0, 2.0, 3.0];
        let gy = nd::array![4.0, 5.0, 6.0];
        let_assert!(Ok(()) = write_raw(&path, &gx, &gy));
        let_assert!(Ok((rx, ry)) = read_raw(&path, 3));
        check!(rx == gx);
        check!(ry == gy);
        let_assert!(
            Err(VdsError::Length(LengthError(4, 6))) = read_raw(&path, 2));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn huge_sample_count() {
        let path = temp_path("io-huge");
        let gx = nd::array![1.0];
        let gy = nd::array![2.0];
        let_assert!(Ok(()) = write_raw(&path, &gx, &gy));
        let_assert!(
            Err(VdsError::Length(LengthError(expected, 2)))
                = read_raw(&path, usize::MAX)
        );
        check!(expected == usize::MAX);
        let_assert!(
            Err(VdsError::Length(LengthError(_, 2)))
                = read_raw(&path, usize::MAX / 4)
        );
        std::fs::remove_file(&path).ok();
    }
}
