/// Lazy, possibly unbounded sequence of values.
///
/// A suspension is resumed only when the consumer asks for the next value,
/// which is how recursive relations avoid running away.
pub enum Stream<T> {
    Empty,
    Pair(T, Box<Stream<T>>),
    Suspension(Box<dyn FnOnce() -> Stream<T>>),
}

impl<T> Stream<T> {
    pub fn empty() -> Self {
        Stream::Empty
    }

    pub fn singleton(x: T) -> Self {
        Stream::cons(x, Stream::Empty)
    }

    pub fn cons(a: T, d: Self) -> Self {
        Stream::Pair(a, Box::new(d))
    }

    pub fn suspension(sup: impl 'static + FnOnce() -> Stream<T>) -> Self {
        Stream::Suspension(Box::new(sup))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stream::Empty)
    }
}

impl<T> std::iter::IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = StreamIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        StreamIter(self)
    }
}

impl<T: 'static> Stream<T> {
    /// All values of `self`, followed by all values of the stream `next`
    /// produces. `next` is not called before `self` is exhausted.
    pub fn append(self, next: impl 'static + FnOnce() -> Stream<T>) -> Self {
        match self {
            Stream::Empty => Stream::suspension(next),
            Stream::Pair(a, d) => Stream::cons(a, d.append(next)),
            Stream::Suspension(sup) => Stream::suspension(move || sup().append(next)),
        }
    }

    pub fn map<U: 'static>(self, f: impl 'static + Fn(T) -> U) -> Stream<U> {
        match self {
            Stream::Empty => Stream::empty(),
            Stream::Pair(a, d) => Stream::cons(f(a), d.map(f)),
            Stream::Suspension(sup) => Stream::suspension(|| sup().map(f)),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Stream::Empty => write!(f, "()"),
            Stream::Suspension(_) => write!(f, "(...)"),
            Stream::Pair(x, next) => {
                let mut next = next;
                write!(f, "({:?}", x)?;
                loop {
                    match &**next {
                        Stream::Empty => break,
                        Stream::Pair(x, n) => {
                            write!(f, " {:?}", x)?;
                            next = n;
                        }
                        Stream::Suspension(_) => {
                            write!(f, " ...")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}

pub struct StreamIter<T>(Stream<T>);

impl<T> Iterator for StreamIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.0, Stream::Empty) {
                Stream::Empty => return None,
                Stream::Pair(a, d) => {
                    self.0 = *d;
                    return Some(a);
                }
                Stream::Suspension(sup) => self.0 = sup(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_from(n: usize) -> Stream<usize> {
        Stream::cons(n, Stream::suspension(move || count_from(n + 1)))
    }

    #[test]
    fn iterating_resumes_suspensions() {
        let s = Stream::suspension(|| Stream::cons(1, Stream::suspension(|| Stream::singleton(2))));
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn unbounded_streams_are_consumed_lazily() {
        let firsts: Vec<_> = count_from(0).into_iter().take(4).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3]);
    }

    #[test]
    fn append_keeps_order_and_defers_the_second_stream() {
        let s = Stream::cons(1, Stream::singleton(2)).append(|| Stream::singleton(3));
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        let s = count_from(0).append(|| panic!("must not be resumed"));
        assert_eq!(s.into_iter().take(3).count(), 3);
    }

    #[test]
    fn map_is_lazy() {
        let s = count_from(1).map(|x| x * 10);
        assert_eq!(s.into_iter().take(3).collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn debug_shows_materialized_prefix() {
        let s = Stream::cons(1, Stream::cons(2, Stream::suspension(Stream::empty)));
        assert_eq!(format!("{:?}", s), "(1 2 ...)");
        assert_eq!(format!("{:?}", Stream::<i32>::empty()), "()");
    }
}
