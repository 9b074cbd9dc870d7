mod array;
mod option;
mod reference;
mod scalar;
mod slice;
