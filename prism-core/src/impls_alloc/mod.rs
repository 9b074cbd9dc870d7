mod boxed;
mod btreemap;
mod btreeset;
mod rc;
mod string;
mod sync;
mod vec;
