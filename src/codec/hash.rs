use data_encoding::HEXLOWER;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{Codec, AUTHOR};
use crate::error::Result;
use crate::types::{Category, CodecMeta};

fn hex_digest<D: Digest>(text: &str) -> String {
    HEXLOWER.encode(&D::digest(text.as_bytes()))
}

pub struct Md5Hasher;

impl Codec for Md5Hasher {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "MD5",
            category: Category::Hasher,
            author: AUTHOR,
            dependencies: &["md-5"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(hex_digest::<Md5>(text))
    }
}

pub struct Sha1Hasher;

impl Codec for Sha1Hasher {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "SHA1",
            category: Category::Hasher,
            author: AUTHOR,
            dependencies: &["sha1"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(hex_digest::<Sha1>(text))
    }
}

pub struct Sha256Hasher;

impl Codec for Sha256Hasher {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "SHA256",
            category: Category::Hasher,
            author: AUTHOR,
            dependencies: &["sha2"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(hex_digest::<Sha256>(text))
    }
}

pub struct Sha384Hasher;

impl Codec for Sha384Hasher {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "SHA384",
            category: Category::Hasher,
            author: AUTHOR,
            dependencies: &["sha2"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(hex_digest::<Sha384>(text))
    }
}

pub struct Sha512Hasher;

impl Codec for Sha512Hasher {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "SHA512",
            category: Category::Hasher,
            author: AUTHOR,
            dependencies: &["sha2"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(hex_digest::<Sha512>(text))
    }
}
