// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

//! Counter mode keystream generation.

use crate::utils::cfg_zeroize::{self, Zeroize as _};
use cipher::{generic_array::GenericArray, Block, BlockEncrypt, BlockSizeUser};

/// Raw CTR mode keystream, i.e. the CTR encryption of an infinite run of
/// zero bytes.
///
/// The counter block is incremented as a single big-endian integer spanning
/// the whole block, wrapping around on overflow. Output not consumed by a
/// [`generate()`](Self::generate) request is buffered and handed out first
/// on the next one, so the produced stream is independent of how it gets
/// chunked.
pub struct CtrKeystream<C>
where
    C: BlockEncrypt,
{
    cipher: C,
    counter: Block<C>,
    block_buf: Block<C>,
    block_buf_remaining_len: usize,
}

impl<C> CtrKeystream<C>
where
    C: BlockEncrypt,
{
    pub fn new(cipher: C, initial_counter: &Block<C>) -> Self {
        Self {
            cipher,
            counter: initial_counter.clone(),
            block_buf: Block::<C>::default(),
            block_buf_remaining_len: 0,
        }
    }

    fn generate_block(&mut self, output: &mut Block<C>) {
        output.copy_from_slice(&self.counter);
        self.cipher.encrypt_block(output);
        ctr_increment_be(&mut self.counter);
    }

    pub fn generate(&mut self, mut output: &mut [u8]) {
        let block_len = <C as BlockSizeUser>::block_size();
        while !output.is_empty() {
            if self.block_buf_remaining_len != 0 {
                // Serve from the tail of the buffered block first.
                let chunk_len = output.len().min(self.block_buf_remaining_len);
                let block_buf_src_begin = block_len - self.block_buf_remaining_len;
                let block_buf_src_end = block_buf_src_begin + chunk_len;
                let (head, tail) = output.split_at_mut(chunk_len);
                head.copy_from_slice(&self.block_buf[block_buf_src_begin..block_buf_src_end]);
                self.block_buf[block_buf_src_begin..block_buf_src_end].zeroize();
                self.block_buf_remaining_len -= chunk_len;
                output = tail;
            } else if output.len() >= block_len {
                let (head, tail) = output.split_at_mut(block_len);
                self.generate_block(GenericArray::from_mut_slice(head));
                output = tail;
            } else {
                let mut block = Block::<C>::default();
                self.generate_block(&mut block);
                self.block_buf.copy_from_slice(&block);
                block.as_mut_slice().zeroize();
                self.block_buf_remaining_len = block_len;
            }
        }
    }
}

impl<C> Drop for CtrKeystream<C>
where
    C: BlockEncrypt,
{
    fn drop(&mut self) {
        self.counter.as_mut_slice().zeroize();
        self.block_buf.as_mut_slice().zeroize();
    }
}

impl<C> cfg_zeroize::ZeroizeOnDrop for CtrKeystream<C> where C: BlockEncrypt {}

fn ctr_increment_be(counter: &mut [u8]) {
    for b in counter.iter_mut().rev() {
        let (sum, carry) = b.overflowing_add(1);
        *b = sum;
        if !carry {
            break;
        }
    }
}

#[cfg(test)]
fn test_aes256_ctr(key: &[u8; 32], initial_counter: &[u8; 16]) -> CtrKeystream<aes::Aes256> {
    use cipher::KeyInit as _;

    let cipher = aes::Aes256::new(GenericArray::from_slice(key));
    CtrKeystream::new(cipher, GenericArray::from_slice(initial_counter))
}

#[test]
fn test_ctr_keystream_nist_sp800_38a_f_5_5() {
    use hex_literal::hex;

    // NIST SP 800-38A, F.5.5 CTR-AES256.Encrypt, first two blocks. The
    // second block exercises a carry out of the last counter byte.
    const KEY: [u8; 32] = hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
    const INITIAL_COUNTER: [u8; 16] = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    const PLAINTEXT: [u8; 32] = hex!(
        "6bc1bee22e409f96e93d7e117393172a"
        "ae2d8a571e03ac9c9eb76fac45af8e51"
    );
    const CIPHERTEXT: [u8; 32] = hex!(
        "601ec313775789a5b7a7f504bbf3d228"
        "f443e3ca4d62b59aca84e990cacaf5c5"
    );

    let mut keystream = test_aes256_ctr(&KEY, &INITIAL_COUNTER);
    let mut buf = [0u8; 32];
    keystream.generate(&mut buf);
    for (b, p) in buf.iter_mut().zip(PLAINTEXT.iter()) {
        *b ^= *p;
    }
    assert_eq!(buf, CIPHERTEXT);
}

#[test]
fn test_ctr_keystream_chunking() {
    const KEY: [u8; 32] = [0x5a; 32];
    const INITIAL_COUNTER: [u8; 16] = [0u8; 16];

    let mut expected = [0u8; 100];
    test_aes256_ctr(&KEY, &INITIAL_COUNTER).generate(&mut expected);

    for chunk_len in [1usize, 3, 15, 16, 17, 31, 64] {
        let mut keystream = test_aes256_ctr(&KEY, &INITIAL_COUNTER);
        let mut generated = [0u8; 100];
        for chunk in generated.chunks_mut(chunk_len) {
            keystream.generate(chunk);
        }
        assert_eq!(generated, expected);
    }
}

#[test]
fn test_ctr_increment_be_wraps() {
    let mut counter = [0xffu8; 4];
    ctr_increment_be(&mut counter);
    assert_eq!(counter, [0u8; 4]);

    let mut counter = [0x00, 0x01, 0xff, 0xff];
    ctr_increment_be(&mut counter);
    assert_eq!(counter, [0x00, 0x02, 0x00, 0x00]);
}
