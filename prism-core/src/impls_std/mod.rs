mod hashmap;
mod hashset;
