pub fn array_len(array: &dyn arrow_array::Array) -> usize {
    array.len()
}
