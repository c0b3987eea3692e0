//! Splits a Motion-JPEG byte stream into individual JPEG frames
//!
//! A frame starts at a start-of-image marker (`FF D8`). Marker segments are
//! copied whole using their length field, so an `FF D9` inside a segment
//! payload (an EXIF thumbnail, say) does not end the frame. Only the
//! end-of-image marker found between segments or in entropy-coded data does.
//! Bytes between frames are skipped and a truncated trailing frame is dropped.

use std::io::{self, BufRead, Read};

const MARKER: u8 = 0xFF;
const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const TEM: u8 = 0x01;
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;
/// Stuffed zero after an `FF` data byte in entropy-coded data
const STUFFED: u8 = 0x00;

pub struct MjpegFrames<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> MjpegFrames<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    /// Skips to just past the next `FF D8`; false at end of stream
    fn seek_start_of_image(&mut self) -> io::Result<bool> {
        let mut skipped = Vec::new();
        loop {
            skipped.clear();
            let read = self.reader.read_until(MARKER, &mut skipped)?;
            if read == 0 || skipped.last() != Some(&MARKER) {
                return Ok(false);
            }
            match self.peek()? {
                None => return Ok(false),
                Some(SOI) => {
                    self.reader.consume(1);
                    return Ok(true);
                }
                // Leave it in place: it may itself start the next marker
                Some(_) => continue,
            }
        }
    }

    /// Copies bytes into `frame` up to and including the next marker code
    ///
    /// Stuffed zeros, restart markers and fill bytes are data, not markers.
    fn next_marker(&mut self, frame: &mut Vec<u8>) -> io::Result<Option<u8>> {
        loop {
            let read = self.reader.read_until(MARKER, frame)?;
            if read == 0 || frame.last() != Some(&MARKER) {
                return Ok(None);
            }
            match self.peek()? {
                None => return Ok(None),
                Some(MARKER) => continue,
                Some(b @ (STUFFED | RST0..=RST7)) => {
                    self.reader.consume(1);
                    frame.push(b);
                }
                Some(b) => {
                    self.reader.consume(1);
                    frame.push(b);
                    return Ok(Some(b));
                }
            }
        }
    }

    /// Appends exactly `len` bytes; false if the stream ends first
    fn copy_exact(&mut self, frame: &mut Vec<u8>, len: u64) -> io::Result<bool> {
        let copied = Read::by_ref(&mut self.reader).take(len).read_to_end(frame)?;
        Ok(copied as u64 == len)
    }

    /// Copies a length-prefixed segment body; false if the stream ends first
    fn copy_segment(&mut self, frame: &mut Vec<u8>) -> io::Result<bool> {
        if !self.copy_exact(frame, 2)? {
            return Ok(false);
        }
        let len = u16::from_be_bytes([frame[frame.len() - 2], frame[frame.len() - 1]]);
        // The length counts its own two bytes
        self.copy_exact(frame, u64::from(len).saturating_sub(2))
    }

    fn read_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        if !self.seek_start_of_image()? {
            return Ok(None);
        }

        let mut frame = vec![MARKER, SOI];
        loop {
            let Some(marker) = self.next_marker(&mut frame)? else {
                return Ok(None);
            };
            match marker {
                EOI => return Ok(Some(frame)),
                // Image restarted without an end marker: drop the partial one
                SOI => frame.truncate(2),
                TEM => {}
                _ => {
                    if !self.copy_segment(&mut frame)? {
                        return Ok(None);
                    }
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for MjpegFrames<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
