use crate::{
    filters::Filters,
    tmdb::{Movie, MovieApi, StreamingInfo, TmdbError, MAX_RESULTS},
};

/// A discovered movie together with where it can be streamed
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub streaming: StreamingInfo,
}

/// Discover movies for the filters and look up streaming providers for each, one at a time.
/// An empty result means TMDB had nothing matching; a failed discovery is an error so the
/// caller can tell the two apart.
pub async fn recommend(
    api: &dyn MovieApi,
    filters: &Filters,
) -> Result<Vec<Recommendation>, TmdbError> {
    let movies = api.try_discover(filters).await?;
    let mut recommendations = Vec::with_capacity(movies.len().min(MAX_RESULTS));
    for movie in movies.into_iter().take(MAX_RESULTS) {
        let streaming = api.get_providers(movie.id).await;
        recommendations.push(Recommendation { movie, streaming });
    }
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DetailForm, DetailInput, Genre};
    use serenity::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMovieApi {
        movies: Vec<Movie>,
        fail: bool,
        discover_calls: Mutex<Vec<Filters>>,
        provider_calls: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl MovieApi for FakeMovieApi {
        async fn try_discover(&self, filters: &Filters) -> Result<Vec<Movie>, TmdbError> {
            self.discover_calls.lock().unwrap().push(filters.clone());
            if self.fail {
                Err(TmdbError::Status {
                    endpoint: "discover",
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                })
            } else {
                Ok(self.movies.clone())
            }
        }

        async fn get_providers(&self, movie_id: u64) -> StreamingInfo {
            self.provider_calls.lock().unwrap().push(movie_id);
            if movie_id % 2 == 0 {
                StreamingInfo::Available(vec!["Netflix".to_owned()])
            } else {
                StreamingInfo::NotAvailable
            }
        }
    }

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            vote_average: 8.0,
            overview: String::new(),
            poster_path: None,
        }
    }

    fn input(year_range: &str) -> DetailInput {
        DetailInput {
            year_range: year_range.to_owned(),
            rating: "7.0".to_owned(),
            language: "Klingon".to_owned(),
        }
    }

    #[tokio::test]
    async fn each_movie_gets_streaming_info_in_order() {
        let api = FakeMovieApi {
            movies: vec![movie(2), movie(3)],
            ..Default::default()
        };
        let filters = DetailForm::new(Genre::Thriller)
            .submit(&input("2000-2005"))
            .unwrap();
        let recommendations = recommend(&api, &filters).await.unwrap();

        assert_eq!(api.discover_calls.lock().unwrap()[0], filters);
        assert_eq!(*api.provider_calls.lock().unwrap(), [2, 3]);
        assert_eq!(
            recommendations,
            vec![
                Recommendation {
                    movie: movie(2),
                    streaming: StreamingInfo::Available(vec!["Netflix".to_owned()]),
                },
                Recommendation {
                    movie: movie(3),
                    streaming: StreamingInfo::NotAvailable,
                },
            ]
        );
    }

    #[tokio::test]
    async fn never_more_than_five() {
        let api = FakeMovieApi {
            movies: (1..=9).map(movie).collect(),
            ..Default::default()
        };
        let filters = DetailForm::new(Genre::Comedy)
            .submit(&input("2000-2005"))
            .unwrap();
        let recommendations = recommend(&api, &filters).await.unwrap();
        assert_eq!(recommendations.len(), MAX_RESULTS);
        assert_eq!(api.provider_calls.lock().unwrap().len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn upstream_failure_is_typed() {
        let api = FakeMovieApi {
            fail: true,
            ..Default::default()
        };
        let filters = DetailForm::new(Genre::Horror)
            .submit(&input("2010-2012"))
            .unwrap();
        let result = recommend(&api, &filters).await;

        assert!(matches!(result, Err(TmdbError::Status { .. })));
        assert!(api.provider_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_matches_is_an_empty_list() {
        let api = FakeMovieApi::default();
        let filters = DetailForm::new(Genre::Romance)
            .submit(&input("1950-1951"))
            .unwrap();
        assert!(recommend(&api, &filters).await.unwrap().is_empty());
        assert_eq!(api.discover_calls.lock().unwrap().len(), 1);
    }
}
