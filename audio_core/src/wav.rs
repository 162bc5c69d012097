use crate::mime::AudioFormat;

/// Wrap raw PCM bytes in a canonical 44-byte RIFF/WAVE header.
///
/// Mono only; channel count is not derived from the MIME type. Pure and
/// total: no I/O, no failure modes. The same inputs always produce a
/// byte-identical buffer.
pub fn encode_wav(pcm: &[u8], format: &AudioFormat) -> Vec<u8> {
    let num_channels: u16 = 1;
    let bits_per_sample = format.bits_per_sample;
    let bytes_per_sample = bits_per_sample / 8;
    let block_align: u16 = num_channels * bytes_per_sample;
    let byte_rate: u32 = format.sample_rate_hz * block_align as u32;
    let data_size: u32 = pcm.len() as u32;
    let riff_size: u32 = 36 + data_size;

    let mut out = Vec::<u8>::with_capacity(44 + pcm.len());

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&num_channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate_hz.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(buf: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([buf[at], buf[at + 1]])
    }

    fn u32_at(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    #[test]
    fn header_fields_round_trip() {
        let format = AudioFormat {
            bits_per_sample: 16,
            sample_rate_hz: 24000,
        };
        let pcm = vec![0u8; 48000];
        let wav = encode_wav(&pcm, &format);

        assert_eq!(wav.len(), 48044);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 48036); // riff chunk size
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16); // fmt sub-chunk size
        assert_eq!(u16_at(&wav, 20), 1); // PCM format tag
        assert_eq!(u16_at(&wav, 22), 1); // mono
        assert_eq!(u32_at(&wav, 24), 24000); // sample rate
        assert_eq!(u32_at(&wav, 28), 48000); // byte rate
        assert_eq!(u16_at(&wav, 32), 2); // block align
        assert_eq!(u16_at(&wav, 34), 16); // bits per sample
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 48000); // data size
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn hound_reads_the_header_back() {
        let format = AudioFormat {
            bits_per_sample: 16,
            sample_rate_hz: 22050,
        };
        let pcm: Vec<u8> = (0u16..256).flat_map(|s| s.to_le_bytes()).collect();
        let wav = encode_wav(&pcm, &format);

        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 256);
    }

    #[test]
    fn twenty_four_bit_format() {
        let format = AudioFormat {
            bits_per_sample: 24,
            sample_rate_hz: 48000,
        };
        let pcm = vec![0u8; 9];
        let wav = encode_wav(&pcm, &format);

        assert_eq!(u16_at(&wav, 32), 3); // block align
        assert_eq!(u32_at(&wav, 28), 144_000); // byte rate
        assert_eq!(u16_at(&wav, 34), 24);
    }

    #[test]
    fn empty_payload_still_gets_a_full_header() {
        let wav = encode_wav(&[], &AudioFormat::default());
        assert_eq!(wav.len(), 44);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
    }

    #[test]
    fn encoding_is_idempotent() {
        let format = AudioFormat::default();
        let pcm: Vec<u8> = (0..255u8).collect();
        assert_eq!(encode_wav(&pcm, &format), encode_wav(&pcm, &format));
    }
}
