pub(super) fn template(key: &str) -> &'static str {
    match key {
        "strategic_fit" => STRATEGIC_FIT,
        "business_value" => BUSINESS_VALUE,
        "scalability" => SCALABILITY,
        "duration_complexity" => PROJECTED_TIMELINE,
        "team_footprint" => TEAM_FOOTPRINT,
        "external_dependence" => EXTERNAL_DEPENDENCE,
        "scope_definition" => SCOPE_DEFINITION,
        "critical_talent" => CRITICAL_TALENT,
        "innovation_complexity" => INNOVATION_COMPLEXITY,
        "implementation_failure" => IMPLEMENTATION_FAILURE,
        _ => FALLBACK,
    }
}

const FALLBACK: &str = "Proje:\n{project_text}\n\n\
Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}";

const STRATEGIC_FIT: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Stratejik Uyumunu (1–5) değerlendirin. Dikkate alın:\n",
    "- Şirket stratejisi ve temel hedeflerle uyum\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Şirket: {past_project_company}\n",
    "Kapsam ve Hedefler: {past_project_scope_and_objectives}\n",
    "**Geçmiş Değerlendirme (Stratejik Uyum):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const BUSINESS_VALUE: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin İş Değeri Katkısını (1–5) değerlendirin. Dikkate alın:\n",
    "- Beklenen ölçülebilir faydalar\n",
    "- Paydaş etkisi ve sonuçları\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "İş Değeri Katkısı: {past_project_business_value_contribution}\n",
    "**Geçmiş Değerlendirme (İş Değeri Katkısı):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const SCALABILITY: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Ölçeklenebilirlik Potansiyelini (1–5) değerlendirin. Dikkate alın:\n",
    "- Ölçek için operasyonel hazırlık\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Ölçeklenebilirlik ve Tekrarlanabilirlik Potansiyeli: {past_project_scalability_data_scope}\n",
    "**Geçmiş Değerlendirme (Ölçeklenebilirlik ve Tekrarlanabilirlik Potansiyeli):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const PROJECTED_TIMELINE: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Tahmini Zaman Çizelgesi gerçekçiliğini (1–5) değerlendirin. Dikkate alın:\n",
    "- Tahmini süre vs kapsam ve kısıtlar\n",
    "- Milestone'lar / kritik yol netliği\n",
    "- Dış bağımlılıklar ve sıralama\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Tahmini Zaman Çizelgesi: {past_project_data_scope}\n",
    "**Geçmiş Değerlendirme (Tahmini Zaman Çizelgesi):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const TEAM_FOOTPRINT: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Ekip Ayak İzini (1–5) değerlendirin. Dikkate alın:\n",
    "- Gerekli roller ve kıdem seviyeleri\n",
    "- Fonksiyonlar arası çaba yoğunluğu\n",
    "Mevcut durum: {current_staff}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const EXTERNAL_DEPENDENCE: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Dış Bağımlılığını (1–5) değerlendirin. Dikkate alın:\n",
    "- Tedarikçi bağımlılığı ve kısıtlar\n",
    "- Dış engeller ve riskler\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Veri Kapsamı: {past_project_data_scope}\n",
    "Paydaşlar: {past_project_stakeholders}\n",
    "**Geçmiş Değerlendirme (Dış Kaynak Bağımlılığı):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const SCOPE_DEFINITION: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Kapsam Tanımını (1–5) değerlendirin. Dikkate alın:\n",
    "- Net kapsam ve başarı kriterleri\n",
    "- Kesin problem tanımı\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Veri Kapsamı: {past_project_data_scope}\n",
    "Kapsam ve Hedefler: {past_project_scope_and_objectives}\n",
    "**Geçmiş Değerlendirme (Kapsam Tanımı):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const CRITICAL_TALENT: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Kritik Yetenek Bağımlılığını (1–5) değerlendirin. Dikkate alın:\n",
    "- Nadir yetenekler ve darboğazlar\n",
    "- Sahiplik netliği\n",
    "Mevcut Durum: {current_staff}\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Kapsam ve Hedefler: {past_project_scope_and_objectives}\n",
    "**Geçmiş Değerlendirme (Kritik Yetenek):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const INNOVATION_COMPLEXITY: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin İnovasyon Karmaşıklığını (1–5) değerlendirin. Dikkate alın:\n",
    "- Teknik bilinmeyenler/Ar-Ge ihtiyaçları\n",
    "- Uygulanabilirlik belirsizliği\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Kapsam ve Hedefler: {past_project_scope_and_objectives}\n",
    "**Geçmiş Değerlendirme (İnovasyon Karmaşıklığı):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const IMPLEMENTATION_FAILURE: &str = concat!(
    "Proje:\n{project_text}\n\n",
    "Yukarıdaki projenin Uygulama Başarısızlığı riskini (1–5) değerlendirin. Dikkate alın:\n",
    "- Uygulama boşlukları ve değişim riskleri\n",
    "- Benimsenme ve yaygınlaştırma engelleri\n",
    "**Geçmiş Proje Örneği:**\n",
    "Proje: {past_project_name}\n",
    "Kapsam ve Hedefler: {past_project_scope_and_objectives}\n",
    "**Geçmiş Değerlendirme (Uygulama Başarısızlığı):** {past_metric_evaluation}\n",
    "Puan: {past_metric_score}\n",
    "Sadece JSON döndürün: {{\"score_1_to_5\": float, \"reason\": str}}"
);
