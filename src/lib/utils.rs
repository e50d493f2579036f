use im::Vector;

pub trait PushImmut<T> {
    fn push(&self, item: T) -> Vector<T>;
}

impl<T: Clone> PushImmut<T> for Vector<T> {
    fn push(&self, item: T) -> Vector<T> {
        let mut result = self.clone();
        result.push_back(item);
        result
    }
}

pub trait CountImmut<K> {
    fn increment(&self, key: K) -> im::OrdMap<K, usize>;
}

// Ordered so dropped-type warnings come out in a stable order.
impl<K: Ord + Clone> CountImmut<K> for im::OrdMap<K, usize> {
    fn increment(&self, key: K) -> im::OrdMap<K, usize> {
        let count = self.get(&key).copied().unwrap_or_default();
        self.update(key, count + 1)
    }
}
