/// Input side of lumascii: locating the image file and loading it as luminosity.

pub mod image;
pub mod locate;
